use std::path::PathBuf;

/// Convenience result type used across Chartas.
pub type ChartasResult<T> = Result<T, ChartasError>;

/// Top-level error taxonomy used by store and service APIs.
#[derive(thiserror::Error, Debug)]
pub enum ChartasError {
    /// No canvas file exists for the id, or the file does not decode as a raster.
    #[error("not found: canvas '{id}' at {}", .path.display())]
    NotFound {
        /// Requested canvas id, as given by the caller.
        id: String,
        /// File path the id resolves to.
        path: PathBuf,
    },

    /// Declared insert dimensions differ from the decoded source raster.
    #[error(
        "size mismatch: source width={actual_width}, given width={declared_width}, \
         source height={actual_height}, given height={declared_height}"
    )]
    SizeMismatch {
        /// Width passed by the caller.
        declared_width: u32,
        /// Height passed by the caller.
        declared_height: u32,
        /// Width of the decoded source raster.
        actual_width: u32,
        /// Height of the decoded source raster.
        actual_height: u32,
    },

    /// Extract corner lies at or beyond the far edge of the canvas.
    #[error("offset out of range: canvas width={width}, x={x}, canvas height={height}, y={y}")]
    OffsetOutOfRange {
        /// Canvas width.
        width: u32,
        /// Canvas height.
        height: u32,
        /// Requested column of the top-left corner.
        x: u32,
        /// Requested row of the top-left corner.
        y: u32,
    },

    /// The persisted format cannot represent the raster.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Client-supplied image bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A request-layer size or offset bound was violated.
    #[error("limit exceeded: {what}={value}, allowed {min}..={max}")]
    LimitExceeded {
        /// Name of the checked parameter.
        what: &'static str,
        /// Offending value.
        value: u32,
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },

    /// Invalid store configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Underlying storage failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification a request layer maps onto its own status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// The addressed canvas does not exist.
    NotFound,
    /// The caller sent parameters or data that cannot be served.
    BadRequest,
    /// Server-side failure; details belong in the log, not the response.
    Internal,
}

impl ChartasError {
    /// Build a [`ChartasError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`ChartasError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ChartasError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ChartasError::NotFound`] value.
    pub fn not_found(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            id: id.into(),
            path: path.into(),
        }
    }

    /// Classify this error for a request layer.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::SizeMismatch { .. }
            | Self::OffsetOutOfRange { .. }
            | Self::Decode(_)
            | Self::LimitExceeded { .. } => ErrorClass::BadRequest,
            Self::Encoding(_) | Self::Config(_) | Self::Io(_) => ErrorClass::Internal,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
