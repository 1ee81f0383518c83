use std::{error, fmt, io};

// ~~ Shape Error ~~

/// Reasons a shape descriptor can be rejected. The descriptor that produced one of these is left
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeError {
    /// A scalar parameter fell outside its inclusive range.
    OutOfRange {
        parameter: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    /// A parameter must be strictly positive (e.g. box half-extents).
    NotPositive { parameter: &'static str, value: f32 },
    /// NaN or infinity was supplied.
    NonFinite { parameter: &'static str },
}

impl ShapeError {
    /// Checks `value` against the inclusive `(min, max)` range.
    pub fn check_range(
        parameter: &'static str,
        value: f32,
        (min, max): (f32, f32),
    ) -> Result<(), Self> {
        if !value.is_finite() {
            return Err(Self::NonFinite { parameter });
        }
        if value < min || value > max {
            return Err(Self::OutOfRange {
                parameter,
                value,
                min,
                max,
            });
        }
        Ok(())
    }

    pub fn check_finite(parameter: &'static str, values: &[f32]) -> Result<(), Self> {
        if values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(Self::NonFinite { parameter })
        }
    }

    pub fn check_positive(parameter: &'static str, values: &[f32]) -> Result<(), Self> {
        Self::check_finite(parameter, values)?;
        match values.iter().find(|&&v| v <= 0.) {
            Some(&value) => Err(Self::NotPositive { parameter, value }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::OutOfRange {
                parameter,
                value,
                min,
                max,
            } => write!(
                f,
                "{} = {} is outside of the range [{}, {}]",
                parameter, value, min, max
            ),
            Self::NotPositive { parameter, value } => {
                write!(f, "{} = {} must be greater than zero", parameter, value)
            }
            Self::NonFinite { parameter } => write!(f, "{} must be a finite number", parameter),
        }
    }
}

impl error::Error for ShapeError {}

// ~~ Hierarchy Error ~~

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// The requested parent is the node itself or one of its descendants.
    ParentCycle { node: String, parent: String },
}

impl fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ParentCycle { node, parent } => write!(
                f,
                "cannot parent node '{}' to '{}' because it would create a cycle",
                node, parent
            ),
        }
    }
}

impl error::Error for HierarchyError {}

// ~~ IO Error ~~

#[derive(Debug)]
pub enum IoError {
    CreateDirectoryFailed(String, io::Error),
    FileNotFound(String),
    ReadFileFailed(String, io::Error),
    WriteFileFailed(String, io::Error),
    SerializeFailed(bincode::Error),
    DeserializeFailed(bincode::Error),
    /// The file is shorter than the expected save header
    MissingHeader { file_path: String, len: usize },
}

impl IoError {
    pub fn read_file_error(io_error: io::Error, file_path: String) -> Self {
        if io_error.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound(file_path)
        } else {
            Self::ReadFileFailed(file_path, io_error)
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::CreateDirectoryFailed(dir, _) => write!(f, "failed to create directory {}", dir),
            Self::FileNotFound(path) => write!(f, "file not found: {}", path),
            Self::ReadFileFailed(path, _) => write!(f, "failed to read file {}", path),
            Self::WriteFileFailed(path, _) => write!(f, "failed to write file {}", path),
            Self::SerializeFailed(_) => write!(f, "failed to serialize save state"),
            Self::DeserializeFailed(_) => write!(f, "failed to deserialize save state"),
            Self::MissingHeader { file_path, len } => write!(
                f,
                "save file {} is {} bytes long which is too short to contain a header",
                file_path, len
            ),
        }
    }
}

impl error::Error for IoError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::CreateDirectoryFailed(_, e)
            | Self::ReadFileFailed(_, e)
            | Self::WriteFileFailed(_, e) => Some(e),
            Self::SerializeFailed(e) | Self::DeserializeFailed(e) => Some(e.as_ref()),
            Self::FileNotFound(_) | Self::MissingHeader { .. } => None,
        }
    }
}
