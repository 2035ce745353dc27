use thiserror::Error;

/// The error type returned by the functions and methods of this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The text to speak was empty or contained only whitespace.
    #[error("cannot speak empty text")]
    EmptyText,

    /// The speech engine failed to render an utterance. The reason is engine-defined.
    #[error("speech engine error: {0}")]
    Engine(String),

    /// An utterance could not be rendered as speech markup.
    #[error("failed to render speech markup: {0}")]
    Markup(#[from] xml::writer::Error),
}

impl Error {
    /// Constructs an [`Error::Engine`] from any displayable reason.
    pub fn engine<S: Into<String>>(reason: S) -> Self {
        Self::Engine(reason.into())
    }
}

/// The type returned by the functions and methods of this crate.
pub type Result<T> = std::result::Result<T, Error>;
