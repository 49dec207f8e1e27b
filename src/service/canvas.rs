use crate::foundation::config::StoreConfig;
use crate::foundation::error::{ChartasError, ChartasResult};
use crate::raster::Raster;
use crate::raster::composite::{blit_clipped, crop_padded};
use crate::store::canvas::CanvasStore;
use crate::store::id::CanvasId;

/// Canvas operations exposed to a request layer.
///
/// Global size maxima are the caller's job (see [`crate::SizeLimits`]); this type only enforces
/// rules that need the stored or decoded data: declared insert size against the actual source,
/// and the extract corner against the canvas size.
#[derive(Debug)]
pub struct CanvasService {
    store: CanvasStore,
}

impl CanvasService {
    /// Wrap an opened store.
    pub fn new(store: CanvasStore) -> Self {
        Self { store }
    }

    /// Open a BMP-backed store from `config` and wrap it.
    pub fn open(config: StoreConfig) -> ChartasResult<Self> {
        CanvasStore::open(config).map(Self::new)
    }

    /// Underlying store.
    pub fn store(&self) -> &CanvasStore {
        &self.store
    }

    /// Persist a black `width x height` canvas and return its id.
    #[tracing::instrument(skip(self))]
    pub fn create_blank(&self, width: u32, height: u32) -> ChartasResult<CanvasId> {
        self.store.create(&Raster::blank(width, height))
    }

    /// Draw `source` onto canvas `target_id` with its top-left corner at `(x, y)`.
    ///
    /// `width`/`height` are the caller's declared source size and must equal the decoded
    /// source's size exactly. Parts of `source` falling outside the canvas are dropped.
    /// The read, the composite and the write happen under one exclusive lock hold.
    #[tracing::instrument(skip(self, source))]
    pub fn insert(
        &self,
        target_id: &str,
        width: u32,
        height: u32,
        x: u32,
        y: u32,
        source: &Raster,
    ) -> ChartasResult<()> {
        if source.dimensions() != (width, height) {
            return Err(ChartasError::SizeMismatch {
                declared_width: width,
                declared_height: height,
                actual_width: source.width(),
                actual_height: source.height(),
            });
        }
        self.store.codec().ensure_encodable(source)?;

        self.store
            .modify(target_id, |target| blit_clipped(target, source, x, y))
    }

    /// Read a `width x height` window of canvas `id` starting at `(x, y)`.
    ///
    /// The corner must lie inside the canvas; whatever part of the window runs past the far
    /// edges comes back black. The result always has the requested size.
    #[tracing::instrument(skip(self))]
    pub fn extract(
        &self,
        id: &str,
        width: u32,
        height: u32,
        x: u32,
        y: u32,
    ) -> ChartasResult<Raster> {
        let canvas = self.store.read(id)?;
        crop_padded(&canvas, width, height, x, y)
    }

    /// Remove canvas `id`; unknown ids succeed.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: &str) -> ChartasResult<()> {
        self.store.delete(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/canvas.rs"]
mod tests;
