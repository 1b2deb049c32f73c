use thiserror::Error;

/// Signalled when the buffer cannot satisfy a read.
///
/// This is a local control-flow value, not a caller-visible failure: the
/// parse loop recovers by stopping and returning the attributes decoded so
/// far. It never escapes [`crate::format::Parser::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("truncated input at offset {offset}: need {needed} bytes, {remaining} remain")]
pub struct Truncated {
    /// Cursor position when the read was attempted.
    pub offset: usize,

    /// Bytes the read required.
    pub needed: usize,

    /// Bytes actually left in the buffer.
    pub remaining: usize,
}

/// Errors acquiring the input buffer.
///
/// Buffer acquisition is the caller's responsibility; this is the only
/// hard failure the crate ever reports. Parsing itself is total over
/// arbitrary byte input and cannot fail.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read into memory.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
