pub mod enums;
pub mod error;
pub mod structs;

// Everything downstream crates need is available from the crate root.
pub use enums::KeepersMode;
pub use error::CoreError;
pub use structs::{BusinessParams, KeeperSource, RawInputs, RawValue, TierMix};
