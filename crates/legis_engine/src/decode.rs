use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decode a page into UTF-8: BOM -> Content-Type charset -> chardetng guess.
///
/// Government sites regularly declare UTF-8 and serve cp1252 bytes. When the
/// chosen encoding is UTF-8 and the bytes are not valid UTF-8 the page is
/// decoded as windows-1252 instead of failing.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedHtml, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(charset_param) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedHtml, DecodeError> {
    let (text, used, had_errors) = enc.decode(bytes);
    if !had_errors {
        return Ok(DecodedHtml {
            html: text.into_owned(),
            encoding_label: used.name().to_string(),
        });
    }
    if used == UTF_8 {
        let (text, _, _) = WINDOWS_1252.decode(bytes);
        return Ok(DecodedHtml {
            html: text.into_owned(),
            encoding_label: WINDOWS_1252.name().to_string(),
        });
    }
    Err(DecodeError::DecodeFailure {
        encoding: used.name().to_string(),
        message: "malformed byte sequence".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::charset_param;

    #[test]
    fn charset_is_read_case_insensitively() {
        assert_eq!(
            charset_param("text/html; Charset=\"ISO-8859-1\"").as_deref(),
            Some("ISO-8859-1")
        );
        assert_eq!(charset_param("text/html").as_deref(), None);
    }
}
