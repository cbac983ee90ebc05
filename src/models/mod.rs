pub mod report;
pub mod violation;

pub use report::{Summary, ViolationReport};
pub use violation::{IdentityKey, ViolationRecord};
