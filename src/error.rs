use thiserror::Error;

/// Errors that can abandon a pipeline run, a clipboard export or a watch.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),

    #[error("unknown highlight theme: {0}")]
    UnknownTheme(String),

    #[error("HTML serialization failed: {0}")]
    Serialize(#[source] std::io::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("clipboard command is empty")]
    EmptyClipboardCommand,

    #[error("clipboard program `{program}` unavailable: {source}")]
    ClipboardUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("clipboard write rejected: {0}")]
    ClipboardRejected(String),

    #[error("file watch failed: {0}")]
    Watch(#[from] notify::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
