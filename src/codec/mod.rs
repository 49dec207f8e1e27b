//! Conversion between in-memory [`Raster`]s and encoded bytes.

pub(crate) mod bmp;

use std::io::Cursor;

use crate::foundation::config::SizeLimits;
use crate::foundation::error::{ChartasError, ChartasResult};
use crate::raster::{PixelLayout, Raster};

/// Codec used by [`crate::CanvasStore`] to persist canvases.
///
/// Implementations must be lossless for the layouts they accept and must report every other
/// layout as [`ChartasError::Encoding`] instead of converting it.
pub trait RasterCodec: Send + Sync {
    /// File extension (without the dot) this codec writes.
    fn extension(&self) -> &str;

    /// Whether `layout` can be written without loss.
    fn supports(&self, layout: PixelLayout) -> bool;

    /// Encode a raster. Fails with [`ChartasError::Encoding`] for unsupported layouts.
    fn encode(&self, raster: &Raster) -> ChartasResult<Vec<u8>>;

    /// Decode bytes previously produced by [`RasterCodec::encode`].
    fn decode(&self, bytes: &[u8]) -> ChartasResult<Raster>;

    /// Fail with [`ChartasError::Encoding`] unless `raster` can be written.
    fn ensure_encodable(&self, raster: &Raster) -> ChartasResult<()> {
        if self.supports(raster.layout()) {
            return Ok(());
        }
        Err(ChartasError::encoding(format!(
            "no writer for {:?} rasters in the '{}' format",
            raster.layout(),
            self.extension()
        )))
    }
}

/// Decode client-supplied image bytes in any format the `image` crate recognises.
///
/// The header dimensions are checked against the canvas bounds of `limits` before any pixel
/// buffer is allocated; within those bounds no further allocation cap applies. Alpha is
/// preserved as [`PixelLayout::Rgba8`] so that callers can refuse it instead of flattening it;
/// everything else becomes [`PixelLayout::Rgb8`].
pub fn decode_source(bytes: &[u8], limits: &SizeLimits) -> ChartasResult<Raster> {
    let (width, height) = guessed_reader(bytes)?
        .into_dimensions()
        .map_err(|e| ChartasError::decode(format!("read image header: {e}")))?;
    limits.check_canvas(width, height)?;

    let mut bounds = image::Limits::default();
    bounds.max_image_width = Some(limits.canvas_max_width);
    bounds.max_image_height = Some(limits.canvas_max_height);
    bounds.max_alloc = None;

    let mut reader = guessed_reader(bytes)?;
    reader.limits(bounds);
    let img = reader
        .decode()
        .map_err(|e| ChartasError::decode(format!("decode image: {e}")))?;
    from_dynamic(img)
}

fn guessed_reader(bytes: &[u8]) -> ChartasResult<image::ImageReader<Cursor<&[u8]>>> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ChartasError::decode(format!("sniff image format: {e}")))?;
    if reader.format().is_none() {
        return Err(ChartasError::decode("unrecognised image format"));
    }
    Ok(reader)
}

pub(crate) fn from_dynamic(img: image::DynamicImage) -> ChartasResult<Raster> {
    let (width, height) = (img.width(), img.height());
    if img.color().has_alpha() {
        Raster::from_raw(width, height, PixelLayout::Rgba8, img.into_rgba8().into_raw())
    } else {
        Raster::from_raw(width, height, PixelLayout::Rgb8, img.into_rgb8().into_raw())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/source.rs"]
mod tests;
