use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad threshold, empty sentinel, etc.).
    ConfigValidation(String),
    /// A product row that is not a flat object.
    MalformedProduct { doc_id: String, index: usize },
    /// JSON parse error reading product rows or documents.
    Json(String),
    /// IO error (file read, CSV decode, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MalformedProduct { doc_id, index } => {
                write!(f, "document '{doc_id}': product row {index} is not an object")
            }
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
