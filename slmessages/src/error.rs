use thiserror::Error;

/// Failures while reading a capture
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error reading capture: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be decoded: truncated or malformed MessagePack,
    /// wrong array shape or a bad sync marker
    #[error("corrupt record #{record}: {source}")]
    Corrupt {
        record: u64,
        #[source]
        source: rmp_serde::decode::Error,
    },
}
