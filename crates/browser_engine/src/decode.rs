use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decode a response body into UTF-8 using: BOM -> Content-Type charset -> UTF-8 -> chardetng fallback.
pub fn decode_text(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedText, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(extract_charset) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    // JSON is UTF-8 in practice; only guess when that fails.
    if std::str::from_utf8(bytes).is_ok() {
        return decode_with(bytes, UTF_8);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches(['"', '\'']))
        })
        .find(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedText, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "malformed byte sequence".into(),
        });
    }
    Ok(DecodedText {
        text: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_parameter_is_case_insensitive() {
        assert_eq!(
            extract_charset("application/json; Charset=\"ISO-8859-1\""),
            Some("ISO-8859-1".to_string())
        );
        assert_eq!(extract_charset("application/json"), None);
    }

    #[test]
    fn latin1_body_decodes_with_declared_charset() {
        let decoded = decode_text(&[0x63, 0x61, 0x66, 0xE9], Some("text/plain; charset=latin1"))
            .expect("decodes");
        assert_eq!(decoded.text, "café");
        assert_eq!(decoded.encoding_label, "windows-1252");
    }

    #[test]
    fn header_charset_wins_over_utf8_guess() {
        // Valid UTF-8 for "é", but the header says latin1.
        let decoded = decode_text(&[0xC3, 0xA9], Some("text/plain; charset=latin1"))
            .expect("decodes");
        assert_eq!(decoded.text, "Ã©");
        assert_eq!(decoded.encoding_label, "windows-1252");
    }

    #[test]
    fn bom_is_stripped() {
        let decoded = decode_text(b"\xEF\xBB\xBF[]", None).expect("decodes");
        assert_eq!(decoded.text, "[]");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn invalid_bytes_for_declared_charset_fail() {
        let err = decode_text(&[0x5B, 0xC3, 0x5D], Some("application/json; charset=utf-8"))
            .unwrap_err();
        assert!(matches!(err, DecodeError::DecodeFailure { .. }));
    }
}
