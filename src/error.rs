use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    /// Transport-level failure: DNS, refused connection, TLS negotiation,
    /// timeout. The menu host was never successfully spoken to.
    Request(reqwest::Error),
    /// The menu host answered, but not with 200.
    Upstream(u16),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Request(e) => write!(f, "Request error: {}", e),
            Error::Upstream(code) => write!(f, "Upstream error: status {}", code),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
