#[derive(thiserror::Error, Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Error {
    /// Transport failure or non-success HTTP status
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered, but not with what was expected
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Format(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("No recipe loaded")]
    NoRecipe,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<recipes_core::Error> for Error {
    fn from(err: recipes_core::Error) -> Self {
        use recipes_core::Error as Core;

        match err {
            Core::Format(msg) => Error::Format(msg),
            Core::Storage(msg) => Error::Storage(msg),
            corrupt @ Core::Corrupt { .. } => Error::Storage(corrupt.to_string()),
            Core::Response(msg) => Error::Validation(msg),
            Core::NoRecipe => Error::NoRecipe,
        }
    }
}
