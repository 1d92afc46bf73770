//! Compliance Validator
//!
//! Stateless checks of a clip against a target device's limits.

mod constraints;
mod validator;

pub use constraints::{DeviceConstraints, MAX_DURATION, MAX_FILE_SIZE, MIN_DURATION};
pub use validator::{estimate_file_size, validate_encoded, validate_for_target, ValidationResult};
