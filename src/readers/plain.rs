// src/readers/plain.rs
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes UTF-8 text, dropping a leading byte order mark.
/// Invalid sequences are replaced rather than rejected.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            tracing::warn!("Document is not valid UTF-8 ({}), decoding lossily", e);
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_bom() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFAbstract"), "Abstract");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        assert_eq!(decode_text(b"caf\xE9 paper"), "caf\u{FFFD} paper");
    }
}
