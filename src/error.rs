use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the simulation core and its configuration layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A vector was divided by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The rewind for a colliding pair has no solution (zero relative
    /// velocity or negative discriminant). Recoverable: the pair is skipped.
    #[error("degenerate collision: {0}")]
    DegenerateCollision(String),

    /// Radius or mass non-positive, or any component not finite.
    #[error("invalid particle parameters: {0}")]
    InvalidParticleParameters(String),

    /// Configuration value outside its domain.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
