use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while building, configuring or reporting a simulation.
///
/// The force and integration hot paths never return these; every check
/// happens when a simulation is constructed or its output is handled.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Two particles are close enough that the pairwise force is undefined.
    #[error("degenerate configuration: particles {i} and {j} are {distance:e} apart")]
    DegenerateConfiguration { i: usize, j: usize, distance: f64 },

    /// Scenario file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// A text trajectory dump did not follow the column layout.
    #[error("malformed dump at line {line}: {message}")]
    MalformedDump { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
