//! Blocking response body streaming.
//! Mirrors Chromium's HttpStream::ReadResponseBody, one frame at a time.

use bytes::{Buf, Bytes};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use std::io::{self, Read};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Adapts a hyper body into `std::io::Read` by driving the connection's
/// runtime for each frame.
pub struct BodyReader {
    runtime: Arc<Runtime>,
    body: Incoming,
    chunk: Bytes,
    finished: bool,
}

impl BodyReader {
    pub fn new(runtime: Arc<Runtime>, body: Incoming) -> Self {
        Self {
            runtime,
            body,
            chunk: Bytes::new(),
            finished: false,
        }
    }

    fn fill(&mut self) -> io::Result<()> {
        while self.chunk.is_empty() && !self.finished {
            match self.runtime.block_on(self.body.frame()) {
                Some(Ok(frame)) => {
                    // Trailers carry no body bytes.
                    if let Ok(data) = frame.into_data() {
                        self.chunk = data;
                    }
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Err(io::Error::new(io::ErrorKind::Other, e));
                }
                None => self.finished = true,
            }
        }
        Ok(())
    }
}

impl Read for BodyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.fill()?;
        let n = buf.len().min(self.chunk.len());
        buf[..n].copy_from_slice(&self.chunk[..n]);
        self.chunk.advance(n);
        Ok(n)
    }
}
