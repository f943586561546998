use thiserror::Error;

/// Raised when a scenario cannot be turned into a clamped parameter set.
///
/// Out-of-range numbers are never an error; they are clamped. Only values that
/// are missing or cannot be read as a number at all end up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please fill in all required fields ({0} is missing).")]
    MissingField(&'static str),

    #[error("Invalid input values. Please check your inputs. ({field}: '{value}' is not a number)")]
    NotNumeric { field: &'static str, value: String },

    #[error("Unknown keepers input mode: '{0}'")]
    UnknownKeepersMode(String),
}
