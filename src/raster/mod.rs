//! In-memory raster buffers and the region algebra over them.

pub(crate) mod composite;

use crate::foundation::error::{ChartasError, ChartasResult};

/// Channel layout of a [`Raster`] buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Opaque 8-bit RGB, three bytes per pixel. The only layout canvases are stored in.
    Rgb8,
    /// 8-bit RGB with straight alpha, four bytes per pixel.
    Rgba8,
}

impl PixelLayout {
    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Whether samples carry an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba8)
    }
}

/// Owned pixel buffer, row-major, origin top-left, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl Raster {
    /// A black, opaque RGB raster of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::black(width, height, PixelLayout::Rgb8)
    }

    /// Black in every colour channel, opaque when the layout carries alpha.
    pub fn black(width: u32, height: u32, layout: PixelLayout) -> Self {
        let data = match layout {
            PixelLayout::Rgb8 => vec![0u8; byte_len(width, height, layout)],
            PixelLayout::Rgba8 => [0u8, 0, 0, u8::MAX].repeat((width as usize) * (height as usize)),
        };
        Self {
            width,
            height,
            layout,
            data,
        }
    }

    /// Wrap an existing buffer. The length must match `width * height * channels`.
    pub fn from_raw(
        width: u32,
        height: u32,
        layout: PixelLayout,
        data: Vec<u8>,
    ) -> ChartasResult<Self> {
        let expected = byte_len(width, height, layout);
        if data.len() != expected {
            return Err(ChartasError::decode(format!(
                "raster buffer is {} bytes, {width}x{height} {layout:?} needs {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// An RGB raster where every pixel is `rgb`.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let px = (width as usize) * (height as usize);
        Self {
            width,
            height,
            layout: PixelLayout::Rgb8,
            data: rgb.repeat(px),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Channel layout.
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Raw sample bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume into the raw sample bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Bytes in one row.
    pub fn stride(&self) -> usize {
        (self.width as usize) * self.layout.channels()
    }

    /// Samples of the pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let ch = self.layout.channels();
        let start = (y as usize) * self.stride() + (x as usize) * ch;
        Some(&self.data[start..start + ch])
    }

    /// Overwrite the pixel at `(x, y)` and return `true`.
    ///
    /// Returns `false`, leaving the raster unchanged, for out-of-range coordinates or `samples`
    /// whose length differs from the layout's channel count.
    #[must_use = "a rejected write leaves the raster unchanged"]
    pub fn set_pixel(&mut self, x: u32, y: u32, samples: &[u8]) -> bool {
        let ch = self.layout.channels();
        if x >= self.width || y >= self.height || samples.len() != ch {
            return false;
        }
        let start = (y as usize) * self.stride() + (x as usize) * ch;
        self.data[start..start + ch].copy_from_slice(samples);
        true
    }

    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = (y as usize) * stride;
        &self.data[start..start + stride]
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = (y as usize) * stride;
        &mut self.data[start..start + stride]
    }
}

fn byte_len(width: u32, height: u32, layout: PixelLayout) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(layout.channels())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/raster.rs"]
mod tests;
