//! Runs the external human mesh reconstruction program over an image folder.

pub mod config;
pub mod error;
pub mod invoker;

pub use config::MeshGenConfig;
pub use error::GenerateError;
pub use invoker::{GenerateOutput, MeshGenJob, MeshGenerator};
