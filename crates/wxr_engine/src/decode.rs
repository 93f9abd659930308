use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// An export decoded into UTF-8, with the encoding that was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedExport {
    pub xml: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode export bytes with {encoding}")]
    DecodeFailure { encoding: String },
}

/// Decode raw export bytes into UTF-8 using: BOM -> XML declaration
/// charset -> chardetng fallback.
pub fn decode_export(bytes: &[u8]) -> Result<DecodedExport, DecodeError> {
    // 1) BOM aware decode using encoding_rs helper
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    // 2) encoding= attribute in the XML declaration
    if let Some(label) = declaration_encoding(bytes) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    // 3) chardetng detection over the whole buffer
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

/// Pull the charset label out of `<?xml ... encoding="..." ?>`, if any.
/// The declaration itself is ASCII for every encoding we accept.
fn declaration_encoding(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let decl = head.strip_prefix("<?xml")?;
    let decl = &decl[..decl.find("?>")?];

    let after = &decl[decl.find("encoding")? + "encoding".len()..];
    let after = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = after.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let value = &after[1..];
    Some(value[..value.find(quote)?].to_string())
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedExport, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
        });
    }
    Ok(DecodedExport {
        xml: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}
