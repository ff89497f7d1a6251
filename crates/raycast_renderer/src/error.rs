use thiserror::Error;

/// Errors that stop a render before it starts.
///
/// Cancellation is not one of them: a cancelled render returns `Ok` with a
/// partial frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot render an empty {width}x{height} frame")]
    EmptyFrame { width: u32, height: u32 },

    #[error("no scene loaded")]
    NoScene,
}

pub type RenderResult<T> = Result<T, RenderError>;
