//! Error types shared by the capture, export and library collaborators

pub use crate::library::LibraryError;

/// Failure reported by a platform capture or recording capability
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The user or platform declined the request
    #[error("permission denied")]
    PermissionDenied,
    #[error("{0}")]
    Failed(String),
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while producing or handing off the final image
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Clipboard(String),
}

/// How a failure is surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Declined capability, silently ignored
    PermissionDenied,
    /// Capture, recording or export failed, shown as a notification
    CapabilityFailure,
    /// Preconditions not met, silently ignored
    InvalidOperation,
    /// The library rejected a save, shown as a notification
    PersistenceFailure,
}

impl ErrorKind {
    /// Whether the user should see a notification for this kind
    pub fn is_user_visible(self) -> bool {
        matches!(
            self,
            ErrorKind::CapabilityFailure | ErrorKind::PersistenceFailure
        )
    }
}

/// Any failure an application action can produce
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
}

impl Error {
    /// Classify this error into one of the four user-facing kinds
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Capture(CaptureError::PermissionDenied) => ErrorKind::PermissionDenied,
            Error::Capture(_) | Error::Export(_) => ErrorKind::CapabilityFailure,
            Error::Library(LibraryError::NotFound(_)) | Error::InvalidOperation(_) => {
                ErrorKind::InvalidOperation
            }
            Error::Library(_) => ErrorKind::PersistenceFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_errors() {
        assert_eq!(
            Error::from(CaptureError::PermissionDenied).kind(),
            ErrorKind::PermissionDenied
        );
        assert_eq!(
            Error::from(CaptureError::Failed("no device".into())).kind(),
            ErrorKind::CapabilityFailure
        );
        assert_eq!(
            Error::from(ExportError::Clipboard("busy".into())).kind(),
            ErrorKind::CapabilityFailure
        );
        assert_eq!(
            Error::from(LibraryError::QuotaExceeded {
                needed: 10,
                quota: 5
            })
            .kind(),
            ErrorKind::PersistenceFailure
        );
        assert_eq!(
            Error::InvalidOperation("nothing to save").kind(),
            ErrorKind::InvalidOperation
        );
    }

    #[test]
    fn only_failures_are_user_visible() {
        assert!(!ErrorKind::PermissionDenied.is_user_visible());
        assert!(!ErrorKind::InvalidOperation.is_user_visible());
        assert!(ErrorKind::CapabilityFailure.is_user_visible());
        assert!(ErrorKind::PersistenceFailure.is_user_visible());
    }
}
