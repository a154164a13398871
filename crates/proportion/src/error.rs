use {npz::NpzError, std::fmt};

#[derive(Debug)]
pub enum AnalyzeError {
    Npz(NpzError),
    Shape {
        array: &'static str,
        expected: &'static str,
        got: String,
    },
    LandmarkOutOfRange {
        name: &'static str,
        index: usize,
    },
    DuplicateLandmark {
        first: &'static str,
        second: &'static str,
        index: usize,
    },
    InvalidHeight(f64),
    DegenerateModel(f64),
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzeError::Npz(err) => write!(f, "{err}"),
            AnalyzeError::Shape {
                array,
                expected,
                got,
            } => write!(f, "{array} has shape {got}, expected {expected}"),
            AnalyzeError::LandmarkOutOfRange { name, index } => {
                write!(f, "landmark {name} uses index {index}, outside the joint set")
            }
            AnalyzeError::DuplicateLandmark {
                first,
                second,
                index,
            } => write!(f, "landmarks {first} and {second} both use index {index}"),
            AnalyzeError::InvalidHeight(height) => {
                write!(f, "actual height must be a positive number of centimeters, got {height}")
            }
            AnalyzeError::DegenerateModel(height) => {
                write!(f, "model height is {height}, cannot scale measurements")
            }
        }
    }
}

impl std::error::Error for AnalyzeError {}

impl From<NpzError> for AnalyzeError {
    fn from(err: NpzError) -> Self {
        AnalyzeError::Npz(err)
    }
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
