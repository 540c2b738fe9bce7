//! Error types for the editor.
//!
//! Interaction never fails: geometry clamps, navigation clamps and pointer
//! capture problems are swallowed. These errors only exist at construction
//! and input-validation boundaries.

use thiserror::Error;

/// Errors raised when building an editing session or validating its inputs.
#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    /// The document handed to the editor has no pages.
    #[error("Document has no pages")]
    EmptyDocument,

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A raster buffer does not match its declared dimensions.
    #[error("Raster buffer size mismatch: expected {expected} bytes, got {actual}")]
    RasterSizeMismatch {
        /// Byte length implied by width * height * 4.
        expected: usize,
        /// Byte length actually supplied.
        actual: usize,
    },
}

/// Errors reported by a host when capturing or releasing a pointer.
///
/// The session never propagates these; they are logged and dropped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CaptureError {
    /// The pointer id is unknown or already released.
    #[error("Pointer {0} is not active")]
    InvalidPointer(i32),

    /// The platform rejected the request.
    #[error("Pointer capture failed: {0}")]
    Platform(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_error_display() {
        assert_eq!(EditorError::EmptyDocument.to_string(), "Document has no pages");

        let err = EditorError::InvalidConfig("max_zoom must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: max_zoom must be positive"
        );

        let err = EditorError::RasterSizeMismatch {
            expected: 16,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "Raster buffer size mismatch: expected 16 bytes, got 12"
        );
    }

    #[test]
    fn test_capture_error_display() {
        assert_eq!(
            CaptureError::InvalidPointer(7).to_string(),
            "Pointer 7 is not active"
        );
        assert_eq!(
            CaptureError::Platform("NotFoundError".to_string()).to_string(),
            "Pointer capture failed: NotFoundError"
        );
    }
}
