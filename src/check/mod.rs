pub mod eval;
pub mod types;

pub use eval::evaluate_check;
pub use types::{CheckKind, CheckResult, CheckSpec};
