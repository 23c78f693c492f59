//! MIME type detection for inline images

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME from a file extension, with or without the leading dot
pub fn guess_mime_from_ext(ext: &str) -> Option<String> {
    mime_guess::from_ext(ext.trim_start_matches('.'))
        .first_raw()
        .map(|s| s.to_string())
}

/// Prefer the extension, fall back to sniffing, otherwise octet-stream
pub fn guess_mime(ext: &str, bytes: &[u8]) -> String {
    if let Some(m) = guess_mime_from_ext(ext) {
        return m;
    }
    if let Some(m) = guess_mime_from_bytes(bytes) {
        return m;
    }
    "application/octet-stream".to_string()
}
