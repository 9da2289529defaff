//! MIME parameter helpers.

use encoding_rs::Encoding;

/// Charset used when a content type names none.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Extract a parameter (e.g. `charset`) from a content type string.
///
/// Parameter names match case-insensitively; surrounding quotes are stripped.
pub fn get_mime_parameter(content_type: &str, name: &str) -> Option<String> {
    if let Ok(parsed) = content_type.parse::<mime::Mime>() {
        return parsed
            .params()
            .find(|(key, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str().trim_matches('"').to_string());
    }

    // Tolerate values `mime` rejects, such as "text/html;charset=utf-8;".
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case(name) {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}

/// The charset named by `content_type`, or [`DEFAULT_CHARSET`].
pub fn charset_of(content_type: Option<&str>) -> String {
    content_type
        .and_then(|ct| get_mime_parameter(ct, "charset"))
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
}

/// Resolve a charset label, falling back to UTF-8 for unknown labels.
pub fn encoding_for(charset: &str) -> &'static Encoding {
    Encoding::for_label(charset.as_bytes()).unwrap_or(encoding_rs::UTF_8)
}
