use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A keepers mode label that is neither direct entry nor rate-based.
    #[error("Unknown keepers mode '{0}' (expected \"Direct entry\" or \"From rate (%)\")")]
    UnknownKeepersMode(String),
}
