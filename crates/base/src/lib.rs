//! Shared math and logging primitives for the physique workspace.

pub mod logging;
pub mod tensor;
pub mod vec3;

pub use logging::{FileLogger, StdoutLogger, init_file_logger, init_stdout_logger, level_from_env};
pub use tensor::{Tensor, TensorError};
pub use vec3::Vec3;

// Re-export log crate so downstream crates can use base::log::*
pub use log;
