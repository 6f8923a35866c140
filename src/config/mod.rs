//! Command-line configuration: task files and duration flags.

mod duration;
mod task_file;

pub use duration::parse_duration_to_millis;
pub use task_file::{load_task_file, ConsumeTaskFile, ProduceTaskFile};
