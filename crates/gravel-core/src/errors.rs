/// Core error type for the client.
///
/// Every failure of a Bot API call lands in exactly one of these variants, so
/// callers can branch on [`Error::kind`] without parsing messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to encode request payload: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status code: {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("telegram returned an error{}", fmt_description(.description))]
    ServiceRejected { description: Option<String> },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fieldless discriminant of [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Encoding,
    Transport,
    UnexpectedStatus,
    Decoding,
    ServiceRejected,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Encoding(_) => ErrorKind::Encoding,
            Error::Transport(_) => ErrorKind::Transport,
            Error::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Error::Decoding(_) => ErrorKind::Decoding,
            Error::ServiceRejected { .. } => ErrorKind::ServiceRejected,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

fn fmt_description(description: &Option<String>) -> String {
    match description {
        Some(d) => format!(": {d}"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
