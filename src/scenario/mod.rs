pub mod plan;
pub mod step;

pub use plan::{inventory_plan, iteration_seed};
pub use step::{ScenarioPlan, StepSpec};
