use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::codec::RasterCodec;
use crate::codec::bmp::BmpCodec;
use crate::foundation::config::StoreConfig;
use crate::foundation::error::{ChartasError, ChartasResult};
use crate::raster::Raster;
use crate::store::id::CanvasId;
use crate::store::stripes::StripedRwLock;

/// File-backed canvas storage with one striped read/write lock per id.
///
/// Every file operation runs while the id's stripe is held: reads under the shared lock,
/// create/update/delete under the exclusive one. Writes go to a temporary file in the root
/// directory that is renamed over the target, so a canvas file is always either the previous
/// content or the new one.
pub struct CanvasStore {
    root: PathBuf,
    extension: String,
    locks: StripedRwLock,
    codec: Box<dyn RasterCodec>,
}

impl CanvasStore {
    /// Open a store persisting 24-bit BMP files, creating the root directory if needed.
    pub fn open(config: StoreConfig) -> ChartasResult<Self> {
        Self::with_codec(config, Box::new(BmpCodec))
    }

    /// Open a store with a custom codec.
    ///
    /// The file extension comes from `config`, so it should agree with what the codec writes.
    pub fn with_codec(config: StoreConfig, codec: Box<dyn RasterCodec>) -> ChartasResult<Self> {
        config.validate()?;
        if !config.root.is_dir() {
            std::fs::create_dir_all(&config.root).map_err(|e| {
                tracing::error!(root = %config.root.display(), error = %e, "create storage root");
                e
            })?;
            tracing::info!(root = %config.root.display(), "created storage root");
        }

        Ok(Self {
            root: config.root,
            extension: config.extension,
            locks: StripedRwLock::new(config.stripes),
            codec,
        })
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Codec used for canvas files.
    pub fn codec(&self) -> &dyn RasterCodec {
        self.codec.as_ref()
    }

    /// File path an id resolves to. The file may not exist.
    pub fn path_for(&self, id: &CanvasId) -> PathBuf {
        self.root.join(format!("{id}.{}", self.extension))
    }

    /// Persist `raster` under a freshly generated id.
    #[tracing::instrument(skip(self, raster), fields(width = raster.width(), height = raster.height()))]
    pub fn create(&self, raster: &Raster) -> ChartasResult<CanvasId> {
        let bytes = self.encode(raster)?;
        let id = CanvasId::generate();
        let key = id.as_hyphenated();

        let _guard = self.locks.write(key.as_bytes());
        self.replace_file(&id, &bytes)?;
        tracing::debug!(%id, bytes = bytes.len(), "canvas created");
        Ok(id)
    }

    /// Load the canvas stored under `id`.
    ///
    /// A missing file, or one that does not decode, is [`ChartasError::NotFound`].
    #[tracing::instrument(skip(self))]
    pub fn read(&self, id: &str) -> ChartasResult<Raster> {
        let id = self.resolve(id)?;
        let key = id.as_hyphenated();

        let _guard = self.locks.read(key.as_bytes());
        self.load(&id)
    }

    /// Replace the whole content of an existing canvas.
    ///
    /// On an encoding failure the previous file is left untouched.
    #[tracing::instrument(skip(self, raster), fields(width = raster.width(), height = raster.height()))]
    pub fn update(&self, id: &str, raster: &Raster) -> ChartasResult<()> {
        let id = self.resolve(id)?;
        let bytes = self.encode(raster)?;
        let key = id.as_hyphenated();

        let _guard = self.locks.write(key.as_bytes());
        if !self.path_for(&id).is_file() {
            return Err(ChartasError::not_found(id.to_string(), self.path_for(&id)));
        }
        self.replace_file(&id, &bytes)?;
        tracing::debug!(%id, bytes = bytes.len(), "canvas updated");
        Ok(())
    }

    /// Read, mutate and write back a canvas inside one exclusive lock window.
    ///
    /// If `f` fails, nothing is written and its error is returned.
    #[tracing::instrument(skip(self, f))]
    pub fn modify<F>(&self, id: &str, f: F) -> ChartasResult<()>
    where
        F: FnOnce(&mut Raster) -> ChartasResult<()>,
    {
        let id = self.resolve(id)?;
        let key = id.as_hyphenated();

        let _guard = self.locks.write(key.as_bytes());
        let mut raster = self.load(&id)?;
        f(&mut raster)?;
        let bytes = self.encode(&raster)?;
        self.replace_file(&id, &bytes)?;
        tracing::debug!(%id, bytes = bytes.len(), "canvas modified");
        Ok(())
    }

    /// Remove a canvas. Unknown ids succeed without doing anything.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: &str) -> ChartasResult<()> {
        let Some(id) = CanvasId::parse(id) else {
            return Ok(());
        };
        let key = id.as_hyphenated();
        let path = self.path_for(&id);

        let _guard = self.locks.write(key.as_bytes());
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(%id, "canvas deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                tracing::error!(%id, path = %path.display(), error = %e, "delete canvas");
                Err(e.into())
            }
        }
    }

    /// Whether a file exists for `id`.
    pub fn exists(&self, id: &str) -> bool {
        let Some(id) = CanvasId::parse(id) else {
            return false;
        };
        let key = id.as_hyphenated();

        let _guard = self.locks.read(key.as_bytes());
        self.path_for(&id).is_file()
    }

    fn resolve(&self, raw: &str) -> ChartasResult<CanvasId> {
        CanvasId::parse(raw).ok_or_else(|| {
            ChartasError::not_found(raw, self.root.join(format!("{raw}.{}", self.extension)))
        })
    }

    // Caller holds the id's stripe.
    fn load(&self, id: &CanvasId) -> ChartasResult<Raster> {
        let path = self.path_for(id);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ChartasError::not_found(id.to_string(), path));
            }
            Err(e) => {
                tracing::error!(%id, path = %path.display(), error = %e, "read canvas");
                return Err(e.into());
            }
        };
        self.codec.decode(&bytes).map_err(|e| {
            tracing::warn!(%id, path = %path.display(), error = %e, "canvas file does not decode");
            ChartasError::not_found(id.to_string(), path)
        })
    }

    fn encode(&self, raster: &Raster) -> ChartasResult<Vec<u8>> {
        self.codec.encode(raster).inspect_err(|e| {
            tracing::error!(error = %e, layout = ?raster.layout(), "encode canvas");
        })
    }

    // Caller holds the id's stripe exclusively.
    fn replace_file(&self, id: &CanvasId, bytes: &[u8]) -> ChartasResult<()> {
        let path = self.path_for(id);
        let write = || -> std::io::Result<()> {
            let mut tmp = tempfile::Builder::new()
                .prefix(".chartas-")
                .suffix(".tmp")
                .tempfile_in(&self.root)?;
            tmp.write_all(bytes)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        };
        write().map_err(|e| {
            tracing::error!(%id, path = %path.display(), error = %e, "write canvas");
            ChartasError::from(e)
        })
    }
}

impl std::fmt::Debug for CanvasStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasStore")
            .field("root", &self.root)
            .field("extension", &self.extension)
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/canvas.rs"]
mod tests;
