#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Malformed row in a parameter or data file. `line` starts at 1.
    Parse {
        line: usize,
        message: String,
    },
    /// Got an invalid parameter value, or a parameter out of its domain
    InvalidParameter(String),
    /// A neighbor geometry does not carry the information required by a
    /// symmetry function, or has inconsistent sizes
    Shape(String),
    /// Error while reading or writing files
    Io(std::io::Error),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
    /// Error related to reading structure files
    Chemfiles(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse { line, message } => write!(f, "parse error at line {}: {}", line, message),
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::Shape(e) => write!(f, "invalid neighbor geometry: {}", e),
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::Chemfiles(e) => write!(f, "chemfiles error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse { .. } |
            Error::InvalidParameter(_) |
            Error::Shape(_) |
            Error::Chemfiles(_) => None,
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::Io(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let error = Error::Parse { line: 3, message: "expected 3 or 4 values, got 2".into() };
        assert_eq!(error.to_string(), "parse error at line 3: expected 3 or 4 values, got 2");

        let error = Error::InvalidParameter("cutoff must be positive, got -1".into());
        assert_eq!(error.to_string(), "invalid parameter: cutoff must be positive, got -1");

        let error = Error::Shape("angular functions require mutual distances".into());
        assert_eq!(error.to_string(), "invalid neighbor geometry: angular functions require mutual distances");
    }
}
