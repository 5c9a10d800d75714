//! Validation of untrusted preview request parameters.

use thiserror::Error;

/// Why a preview request was refused before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The file identifier was empty.
    #[error("file identifier must not be empty")]
    EmptyFileId,
    /// The requested width was not a positive pixel count.
    #[error("invalid preview width: {0}")]
    InvalidWidth(i64),
    /// The requested height was not a positive pixel count.
    #[error("invalid preview height: {0}")]
    InvalidHeight(i64),
    /// A parameter could not be parsed at all.
    #[error("malformed request parameter: {0}")]
    Malformed(String),
    /// The preview provider refused the parameters after resolution.
    #[error("preview parameters refused: {0}")]
    Refused(String),
}

/// A request whose parameters passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    /// Path of the file inside the user's tree.
    pub file_id: String,
    /// Preview width in pixels.
    pub width: u32,
    /// Preview height in pixels.
    pub height: u32,
    /// Version token, `None` for the live file.
    pub version: Option<String>,
}

/// Checks request parameters in a fixed order: file identifier, width,
/// height. The version token is passed through untouched; only the version
/// store decides whether it names anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator;

impl RequestValidator {
    /// Creates a validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate the raw parameters of a preview request.
    pub fn validate(
        &self,
        file_id: &str,
        width: i64,
        height: i64,
        version: &str,
    ) -> Result<ValidatedRequest, ValidationError> {
        if file_id.is_empty() {
            return Err(ValidationError::EmptyFileId);
        }
        let width = positive(width).ok_or(ValidationError::InvalidWidth(width))?;
        let height = positive(height).ok_or(ValidationError::InvalidHeight(height))?;

        Ok(ValidatedRequest {
            file_id: file_id.to_string(),
            width,
            height,
            version: (!version.is_empty()).then(|| version.to_string()),
        })
    }
}

fn positive(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_id_wins_over_everything() {
        let v = RequestValidator::new();
        assert_eq!(v.validate("", 10, 10, ""), Err(ValidationError::EmptyFileId));
        assert_eq!(v.validate("", -1, 0, "42"), Err(ValidationError::EmptyFileId));
    }

    #[test]
    fn test_width_checked_before_height() {
        let v = RequestValidator::new();
        assert_eq!(v.validate("a", 0, 10, ""), Err(ValidationError::InvalidWidth(0)));
        assert_eq!(v.validate("a", -5, -5, ""), Err(ValidationError::InvalidWidth(-5)));
        assert_eq!(v.validate("a", 10, 0, ""), Err(ValidationError::InvalidHeight(0)));
        assert_eq!(v.validate("a", 10, -3, ""), Err(ValidationError::InvalidHeight(-3)));
    }

    #[test]
    fn test_oversized_dimensions_are_invalid() {
        let v = RequestValidator::new();
        let huge = i64::from(u32::MAX) + 1;
        assert_eq!(v.validate("a", huge, 10, ""), Err(ValidationError::InvalidWidth(huge)));
        assert_eq!(v.validate("a", 10, huge, ""), Err(ValidationError::InvalidHeight(huge)));
    }

    #[test]
    fn test_version_token_is_not_inspected() {
        let v = RequestValidator::new();

        let live = v.validate("a.png", 32, 16, "").unwrap();
        assert_eq!(live.version, None);
        assert_eq!((live.width, live.height), (32, 16));

        let odd = v.validate("a.png", 1, 1, "not-a-timestamp").unwrap();
        assert_eq!(odd.version.as_deref(), Some("not-a-timestamp"));
    }
}
