use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtensionError {
    /// Local bug: asked to encode something absent or unencodable.
    #[error("internal error: {0}")]
    InternalError(&'static str),
    /// Caller passed no extension bytes.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Bytes left over after the extension value was parsed.
    #[error("{0} trailing byte(s) after extension value")]
    TrailingData(usize),
    #[error("decode error: {0}")]
    Decode(&'static str),
}

pub type ExtensionResult<T> = Result<T, ExtensionError>;
