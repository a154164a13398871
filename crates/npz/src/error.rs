use std::fmt;

#[derive(Debug)]
pub enum NpzError {
    Io(std::io::Error),
    Archive(zip::result::ZipError),
    BadMagic,
    UnsupportedVersion(u8, u8),
    Header(String),
    UnsupportedDtype(String),
    SizeMismatch { expected: usize, got: usize },
    MissingArray(String),
}

impl fmt::Display for NpzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NpzError::Io(err) => write!(f, "io error: {err}"),
            NpzError::Archive(err) => write!(f, "archive error: {err}"),
            NpzError::BadMagic => write!(f, "not an npy array: missing \\x93NUMPY magic bytes"),
            NpzError::UnsupportedVersion(major, minor) => {
                write!(f, "unsupported npy format version {major}.{minor}")
            }
            NpzError::Header(msg) => write!(f, "invalid npy header: {msg}"),
            NpzError::UnsupportedDtype(descr) => write!(f, "unsupported dtype '{descr}'"),
            NpzError::SizeMismatch { expected, got } => {
                write!(f, "array data holds {got} bytes, header describes {expected}")
            }
            // Mirrors the message NumPy gives for a missing key.
            NpzError::MissingArray(name) => write!(f, "{name} is not a file in the archive"),
        }
    }
}

impl std::error::Error for NpzError {}

impl From<std::io::Error> for NpzError {
    fn from(err: std::io::Error) -> Self {
        NpzError::Io(err)
    }
}

impl From<zip::result::ZipError> for NpzError {
    fn from(err: zip::result::ZipError) -> Self {
        NpzError::Archive(err)
    }
}

pub type Result<T> = std::result::Result<T, NpzError>;
