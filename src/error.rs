use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Please fill all required fields (missing: {})", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    #[error("No event series named '{0}'")]
    UnknownSeries(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Guideline section {section} does not exist ({len} sections)")]
    SectionOutOfRange { section: usize, len: usize },

    #[error("Item {index} does not exist ({len} items)")]
    ItemOutOfRange { index: usize, len: usize },

    #[error("Points must be a number, got '{0}'")]
    InvalidPoints(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid tick count: {0}")]
    InvalidTicks(String),

    #[error("Invalid SIMS_TICK_MS value: {0}")]
    InvalidTickInterval(String),

    #[error("Invalid SIMS_RNG_SEED value: {0}")]
    InvalidSeed(String),
}
