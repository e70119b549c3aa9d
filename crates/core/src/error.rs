/// Error type for core operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An ingredient or numeric form field could not be parsed
    #[error("{0}")]
    Format(String),

    /// The key-value store could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// A persisted collection is not valid JSON for its type
    #[error("Corrupt stored data under '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// The API returned a payload that does not have the expected shape
    #[error("Unexpected API response: {0}")]
    Response(String),

    /// An operation needs a current recipe but none is loaded
    #[error("No recipe loaded")]
    NoRecipe,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
