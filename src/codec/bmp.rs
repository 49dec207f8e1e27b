use std::io::Cursor;

use image::ImageEncoder as _;

use crate::codec::RasterCodec;
use crate::foundation::error::{ChartasError, ChartasResult};
use crate::raster::{PixelLayout, Raster};

/// Uncompressed 24-bit BMP.
#[derive(Clone, Copy, Debug, Default)]
pub struct BmpCodec;

impl RasterCodec for BmpCodec {
    fn extension(&self) -> &str {
        "bmp"
    }

    fn supports(&self, layout: PixelLayout) -> bool {
        layout == PixelLayout::Rgb8
    }

    fn encode(&self, raster: &Raster) -> ChartasResult<Vec<u8>> {
        self.ensure_encodable(raster)?;

        let (width, height) = raster.dimensions();
        let mut out = Vec::with_capacity(54 + raster.as_bytes().len() + 4 * height as usize);
        image::codecs::bmp::BmpEncoder::new(&mut out)
            .write_image(
                raster.as_bytes(),
                width,
                height,
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| ChartasError::encoding(format!("write bmp {width}x{height}: {e}")))?;
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> ChartasResult<Raster> {
        let mut reader =
            image::ImageReader::with_format(Cursor::new(bytes), image::ImageFormat::Bmp);
        // Stored canvases may exceed the default allocation limit.
        reader.no_limits();
        let img = reader
            .decode()
            .map_err(|e| ChartasError::decode(format!("read bmp: {e}")))?;
        let (width, height) = (img.width(), img.height());
        Raster::from_raw(width, height, PixelLayout::Rgb8, img.into_rgb8().into_raw())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/bmp.rs"]
mod tests;
