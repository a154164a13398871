//! Reading and writing NumPy `.npy` arrays and `.npz` bundles.

pub mod archive;
pub mod error;
pub mod npy;

pub use archive::{NpzArchive, NpzWriter};
pub use error::NpzError;
pub use npy::{ByteOrder, Dtype, Kind, NpyHeader};
