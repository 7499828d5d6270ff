//! Policy, pattern and result types.

mod pattern;
mod policy;
mod validation;

pub use pattern::{matches, HostPattern};
pub use policy::{Policy, DEFAULT_BLACKLIST};
pub use validation::ValidationResult;
