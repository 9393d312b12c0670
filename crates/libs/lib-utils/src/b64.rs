//! # Data URL Decoding
//!
//! Listings store images as references. Inline images arrive as
//! `data:<mime>;base64,<payload>` URLs; this module splits and decodes them.

use base64::{engine::general_purpose, Engine as _};

/// A decoded `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Decode a base64 `data:` URL into its media type and payload bytes.
pub fn decode_data_url(url: &str) -> Result<DataUrl, Error> {
    let rest = url.strip_prefix("data:").ok_or(Error::NotDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(Error::MissingPayload)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(Error::NotBase64)?
        .to_string();

    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| Error::FailToB64Decode)?;

    if bytes.is_empty() {
        return Err(Error::MissingPayload);
    }

    Ok(DataUrl { mime, bytes })
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    NotDataUrl,
    NotBase64,
    MissingPayload,
    FailToB64Decode,
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png_data_url() {
        // "hello" in base64
        let url = "data:image/png;base64,aGVsbG8=";
        let decoded = decode_data_url(url).expect("valid data url");
        assert_eq!(decoded.mime, "image/png");
        assert_eq!(decoded.bytes, b"hello");
    }

    #[test]
    fn test_rejects_non_base64_and_garbage() {
        assert_eq!(decode_data_url("https://x/y.png"), Err(Error::NotDataUrl));
        assert_eq!(decode_data_url("data:image/png,raw"), Err(Error::NotBase64));
        assert_eq!(decode_data_url("data:image/png;base64"), Err(Error::MissingPayload));
        assert_eq!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(Error::FailToB64Decode)
        );
    }
}
