use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum WebMapError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    ConfigError(String),
    TransportError(String),
    SamplingError(String),
}

impl fmt::Display for WebMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebMapError::IoError(err) => write!(f, "IO error: {}", err),
            WebMapError::JsonError(err) => write!(f, "JSON error: {}", err),
            WebMapError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            WebMapError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            WebMapError::SamplingError(msg) => write!(f, "Sampling error: {}", msg),
        }
    }
}

impl Error for WebMapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WebMapError::IoError(err) => Some(err),
            WebMapError::JsonError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WebMapError {
    fn from(err: std::io::Error) -> Self {
        WebMapError::IoError(err)
    }
}

impl From<serde_json::Error> for WebMapError {
    fn from(err: serde_json::Error) -> Self {
        WebMapError::JsonError(err)
    }
}
