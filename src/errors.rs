use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// A kinematic or mass quantity became NaN or infinite. The vehicle is
    /// frozen and will not be advanced again until it is rebuilt.
    #[error("Corrupted state: {field} is not finite")]
    CorruptedState { field: &'static str },

    #[error("Invalid part: {0}")]
    InvalidPart(String),

    #[error("Unknown design: {0}")]
    UnknownDesign(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
