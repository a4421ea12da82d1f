pub mod index;
pub mod project_ops;
pub mod task_ops;
