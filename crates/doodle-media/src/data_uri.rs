//! Base64 data-URI parsing and validation.

use std::sync::LazyLock;

use base64::{engine::general_purpose::STANDARD, Engine};
use regex::Regex;

use crate::error::{MediaError, MediaResult};

/// Shortest base64 payload accepted for analysis.
///
/// Anything smaller is a near-empty canvas.
pub const MIN_PAYLOAD_LEN: usize = 100;

static IMAGE_DATA_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:image/(png|jpeg);base64,").expect("valid data URI pattern")
});

/// Raster encodings accepted by the remote model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMime {
    Png,
    Jpeg,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Jpeg => "image/jpeg",
        }
    }

    fn from_subtype(subtype: &str) -> Option<Self> {
        match subtype {
            "png" => Some(ImageMime::Png),
            "jpeg" => Some(ImageMime::Jpeg),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageMime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed `data:<mime>;base64,<payload>` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime: String,
    payload: String,
}

impl DataUri {
    /// Parse any base64 data URI.
    pub fn parse(input: &str) -> MediaResult<Self> {
        let rest = input
            .strip_prefix("data:")
            .ok_or_else(|| MediaError::format("missing data: scheme"))?;

        let (header, payload) = rest.split_once(',').unwrap_or((rest, ""));
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| MediaError::format("data URI is not base64 encoded"))?;

        Ok(Self {
            mime: mime.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Build a data URI from raw bytes.
    pub fn encode(mime: ImageMime, bytes: &[u8]) -> Self {
        Self {
            mime: mime.as_str().to_string(),
            payload: STANDARD.encode(bytes),
        }
    }

    /// Declared mime type, e.g. `image/png`.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Declared mime type if it is one the remote model accepts.
    pub fn image_mime(&self) -> Option<ImageMime> {
        self.mime
            .strip_prefix("image/")
            .and_then(ImageMime::from_subtype)
    }

    /// Base64 payload after the comma.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Fail with [`MediaError::TooSmall`] if the payload is shorter than `min`.
    pub fn ensure_min_len(&self, min: usize) -> MediaResult<()> {
        if self.payload.len() < min {
            return Err(MediaError::too_small(self.payload.len(), min));
        }
        Ok(())
    }

    /// Decode the base64 payload.
    pub fn decode(&self) -> MediaResult<Vec<u8>> {
        Ok(STANDARD.decode(self.payload.trim())?)
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, self.payload)
    }
}

/// Check that `uri` is a well-formed PNG or JPEG data URI.
pub fn validate_image_data_uri(uri: &str) -> MediaResult<()> {
    if IMAGE_DATA_URI.is_match(uri) {
        Ok(())
    } else {
        Err(MediaError::format("Invalid image format after processing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_uri() {
        let uri = DataUri::parse("data:image/jpeg;base64,QUJD").unwrap();
        assert_eq!(uri.mime(), "image/jpeg");
        assert_eq!(uri.image_mime(), Some(ImageMime::Jpeg));
        assert_eq!(uri.payload(), "QUJD");
        assert_eq!(uri.decode().unwrap(), b"ABC");
        assert_eq!(uri.to_string(), "data:image/jpeg;base64,QUJD");
    }

    #[test]
    fn test_parse_rejects_non_data_uri() {
        assert!(matches!(
            DataUri::parse("https://example.com/a.png"),
            Err(MediaError::Format(_))
        ));
        assert!(matches!(
            DataUri::parse("data:image/png,plain"),
            Err(MediaError::Format(_))
        ));
    }

    #[test]
    fn test_missing_payload_is_too_small() {
        let uri = DataUri::parse("data:image/png;base64").unwrap();
        assert!(matches!(
            uri.ensure_min_len(MIN_PAYLOAD_LEN),
            Err(MediaError::TooSmall { len: 0, min: 100 })
        ));
    }

    #[test]
    fn test_min_payload_len_boundary() {
        let short = DataUri::parse(&format!("data:image/png;base64,{}", "A".repeat(99))).unwrap();
        assert!(matches!(
            short.ensure_min_len(MIN_PAYLOAD_LEN),
            Err(MediaError::TooSmall { len: 99, min: 100 })
        ));

        let exact = DataUri::parse(&format!("data:image/png;base64,{}", "A".repeat(100))).unwrap();
        assert!(exact.ensure_min_len(MIN_PAYLOAD_LEN).is_ok());
    }

    #[test]
    fn test_validate_image_data_uri() {
        assert!(validate_image_data_uri("data:image/png;base64,AAAA").is_ok());
        assert!(validate_image_data_uri("data:image/jpeg;base64,AAAA").is_ok());
        assert!(validate_image_data_uri("data:image/gif;base64,AAAA").is_err());
        assert!(validate_image_data_uri("image/png;base64,AAAA").is_err());
    }
}
