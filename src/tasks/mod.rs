//! Command handlers. Each one resolves a task file plus command-line
//! overrides into the task's input groups and runs the task.

pub mod consume;
pub mod produce;

pub use consume::ConsumeArgs;
pub use produce::ProduceArgs;
