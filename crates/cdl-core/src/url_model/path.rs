//! Filename extraction from URL path.

use percent_encoding::percent_decode_str;

/// Extracts the last path segment from a URL for use as a filename.
///
/// The segment is percent-decoded, so `My%20Cover.jpg` and `My Cover.jpg`
/// both name the file `My Cover.jpg`. Trailing slashes are ignored.
/// Returns `None` if the URL cannot be parsed, the path is empty/root, or the
/// decoded segment is not a plain file name (`.`, `..`, embedded separators,
/// invalid UTF-8).
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    let name = percent_decode_str(segment).decode_utf8().ok()?;
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return None;
    }
    Some(name.into_owned())
}
