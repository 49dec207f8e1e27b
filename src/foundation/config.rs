use std::path::{Path, PathBuf};

use crate::foundation::error::{ChartasError, ChartasResult};

/// Default number of lock stripes, sized to a typical worker pool.
pub const DEFAULT_STRIPES: usize = 200;

/// Storage configuration handed to [`crate::CanvasStore::open`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory holding one file per canvas.
    pub root: PathBuf,
    /// Number of read/write lock stripes shared by all canvas ids.
    pub stripes: usize,
    /// File extension (without the dot) used for canvas files.
    pub extension: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./chartas-data"),
            stripes: DEFAULT_STRIPES,
            extension: "bmp".to_string(),
        }
    }
}

impl StoreConfig {
    /// Default configuration rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Load a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> ChartasResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| ChartasError::config(format!("parse '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the store cannot run with.
    pub fn validate(&self) -> ChartasResult<()> {
        if self.stripes == 0 {
            return Err(ChartasError::config("stripes must be > 0"));
        }
        if self.extension.is_empty() || self.extension.contains(['.', '/', '\\']) {
            return Err(ChartasError::config(format!(
                "invalid canvas file extension '{}'",
                self.extension
            )));
        }
        if self.root.as_os_str().is_empty() {
            return Err(ChartasError::config("storage root must not be empty"));
        }
        Ok(())
    }
}

/// Global size bounds enforced by the request layer before calling the service.
///
/// The service itself only checks rules that depend on stored data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizeLimits {
    /// Maximum width of a whole canvas (create, insert).
    pub canvas_max_width: u32,
    /// Maximum height of a whole canvas (create, insert).
    pub canvas_max_height: u32,
    /// Maximum width of an extracted segment.
    pub segment_max_width: u32,
    /// Maximum height of an extracted segment.
    pub segment_max_height: u32,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            canvas_max_width: 20_000,
            canvas_max_height: 50_000,
            segment_max_width: 5_000,
            segment_max_height: 5_000,
        }
    }
}

impl SizeLimits {
    /// Bounds for `create` and `insert` dimensions.
    pub fn check_canvas(&self, width: u32, height: u32) -> ChartasResult<()> {
        check_range("width", width, 1, self.canvas_max_width)?;
        check_range("height", height, 1, self.canvas_max_height)
    }

    /// Bounds for `extract` dimensions.
    pub fn check_segment(&self, width: u32, height: u32) -> ChartasResult<()> {
        check_range("width", width, 1, self.segment_max_width)?;
        check_range("height", height, 1, self.segment_max_height)
    }
}

fn check_range(what: &'static str, value: u32, min: u32, max: u32) -> ChartasResult<()> {
    if value < min || value > max {
        return Err(ChartasError::LimitExceeded {
            what,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
