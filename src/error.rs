use thiserror::Error;

/// An error raised while loading a network, snapshot or style.
///
/// Drawing never fails; only the decoding of external data does.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to decode network XML: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid shape coordinate `{0}`")]
    Shape(String),
    #[error("invalid colour `{0}`")]
    Color(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
