pub mod failure_policy;

pub use failure_policy::{FailureAction, FailurePolicy};
