use crate::foundation::error::{ChartasError, ChartasResult};
use crate::raster::Raster;

/// Copy `src` into `dst` with its top-left corner at `(x, y)`.
///
/// Samples that would land outside `dst` are dropped. Both rasters must share a pixel layout;
/// a mismatch is an encoding error because `dst` could not hold the samples losslessly.
pub fn blit_clipped(dst: &mut Raster, src: &Raster, x: u32, y: u32) -> ChartasResult<()> {
    if dst.layout() != src.layout() {
        return Err(ChartasError::encoding(format!(
            "cannot composite {:?} samples into a {:?} raster",
            src.layout(),
            dst.layout()
        )));
    }
    if x >= dst.width() || y >= dst.height() {
        return Ok(());
    }

    let copy_w = src.width().min(dst.width() - x);
    let copy_h = src.height().min(dst.height() - y);
    let ch = dst.layout().channels();
    let dst_start = (x as usize) * ch;
    let len = (copy_w as usize) * ch;

    for row in 0..copy_h {
        let src_row = &src.row(row)[..len];
        dst.row_mut(y + row)[dst_start..dst_start + len].copy_from_slice(src_row);
    }
    Ok(())
}

/// Cut a `width x height` window out of `src` starting at `(x, y)`.
///
/// The corner must lie strictly inside `src`. Any part of the window past the far edges of `src`
/// is black; the result always has exactly the requested size.
pub fn crop_padded(src: &Raster, width: u32, height: u32, x: u32, y: u32) -> ChartasResult<Raster> {
    if x >= src.width() || y >= src.height() {
        return Err(ChartasError::OffsetOutOfRange {
            width: src.width(),
            height: src.height(),
            x,
            y,
        });
    }

    let ch = src.layout().channels();
    let mut out = Raster::black(width, height, src.layout());

    let copy_w = width.min(src.width() - x);
    let copy_h = height.min(src.height() - y);
    let src_start = (x as usize) * ch;
    let len = (copy_w as usize) * ch;

    for row in 0..copy_h {
        let src_row = &src.row(y + row)[src_start..src_start + len];
        out.row_mut(row)[..len].copy_from_slice(src_row);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
