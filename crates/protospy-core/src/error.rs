//! Error types for packet construction and transmission.

use thiserror::Error;

/// Main error type for the packet senders.
#[derive(Error, Debug)]
pub enum SenderError {
    // Privilege errors
    #[error("Raw packet transmission requires root privileges")]
    InsufficientPrivileges,

    // Socket/IO errors
    #[error("Failed to create socket: {0}")]
    SocketCreation(#[source] std::io::Error),

    #[error("Failed to set socket option {option}: {source}")]
    SocketOption {
        option: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Write failed: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Short write: sent {sent} of {expected} bytes")]
    ShortWrite { sent: usize, expected: usize },

    // Field errors
    #[error("Invalid {field} address {value:?}: expected an IPv4 address or host name")]
    InvalidAddress { field: &'static str, value: String },

    #[error("Failed to resolve {field} host {value:?}: {source}")]
    AddressResolution {
        field: &'static str,
        value: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Value {value} for {field} does not fit in {bits} bits")]
    FieldOutOfRange {
        field: &'static str,
        value: i64,
        bits: u32,
    },

    #[error("Invalid TCP flags {value:?}: unknown flag {flag:?}")]
    InvalidFlags { value: String, flag: char },

    // Packet errors
    #[error("Packet too large: {len} bytes exceeds the IPv4 maximum of 65535")]
    PacketTooLarge { len: usize },

    #[error("Failed to build {layer} layer: {reason}")]
    BuildFailed { layer: &'static str, reason: String },

    #[error("Failed to parse {layer} layer: {reason}")]
    PacketParseFailed { layer: &'static str, reason: String },

    // Platform errors
    #[error("Raw packet transmission is not supported on this platform")]
    UnsupportedPlatform,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SenderError {
    /// Returns true if this error was raised by the input values rather than by
    /// the operating system.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAddress { .. }
                | Self::AddressResolution { .. }
                | Self::FieldOutOfRange { .. }
                | Self::InvalidFlags { .. }
                | Self::PacketTooLarge { .. }
                | Self::BuildFailed { .. }
        )
    }
}

impl From<std::io::Error> for SenderError {
    fn from(err: std::io::Error) -> Self {
        SenderError::WriteFailed(err)
    }
}

/// Result type alias for sender operations.
pub type SenderResult<T> = Result<T, SenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors() {
        assert!(SenderError::InvalidAddress {
            field: "destination",
            value: "nope".into()
        }
        .is_input_error());
        assert!(SenderError::InvalidFlags {
            value: "AZ".into(),
            flag: 'Z'
        }
        .is_input_error());
        assert!(SenderError::PacketTooLarge { len: 70000 }.is_input_error());
        assert!(SenderError::FieldOutOfRange {
            field: "sport",
            value: 70000,
            bits: 16
        }
        .is_input_error());
        assert!(!SenderError::UnsupportedPlatform.is_input_error());
        assert!(!SenderError::WriteFailed(std::io::Error::other("down")).is_input_error());
    }

    #[test]
    fn test_error_text_carries_source() {
        let err = SenderError::WriteFailed(std::io::Error::other("Network is unreachable"));
        assert_eq!(err.to_string(), "Write failed: Network is unreachable");
    }

    #[test]
    fn test_io_error_keeps_os_text() {
        let err: SenderError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Operation not permitted")
                .into();
        assert!(matches!(err, SenderError::WriteFailed(_)));
        assert!(err.to_string().contains("Operation not permitted"));
    }
}
