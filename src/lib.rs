//! Chartas stores fixed-format RGB raster canvases on disk, one file per generated id.
//!
//! Canvases support four operations, all safe to run concurrently against the same id:
//!
//! - **create**: persist a black canvas of a given size and hand back its [`CanvasId`]
//! - **insert**: composite a source raster onto a canvas at an offset, dropping whatever falls
//!   outside the canvas
//! - **extract**: cut a window out of a canvas, padding with black wherever the window runs past
//!   the canvas edges
//! - **delete**: remove a canvas (idempotent)
//!
//! # Layers
//!
//! 1. [`StripedRwLock`]: a fixed array of read/write locks; every key hashes onto one stripe.
//! 2. [`CanvasStore`]: file CRUD for encoded rasters, each file operation under its id's stripe,
//!    with atomic temp-file-and-rename writes.
//! 3. [`CanvasService`]: the raster algebra ([`blit_clipped`], [`crop_padded`]) and the
//!    dimension/offset rules, returning typed [`ChartasError`]s.
//!
//! Parameter parsing, global size limits and byte-level decoding of client uploads belong to the
//! caller; [`SizeLimits`] and [`decode_source`] are provided for that layer.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod foundation;
mod raster;
mod service;
mod store;

pub use codec::bmp::BmpCodec;
pub use codec::{RasterCodec, decode_source};
pub use foundation::config::{DEFAULT_STRIPES, SizeLimits, StoreConfig};
pub use foundation::error::{ChartasError, ChartasResult, ErrorClass};
pub use raster::composite::{blit_clipped, crop_padded};
pub use raster::{PixelLayout, Raster};
pub use service::canvas::CanvasService;
pub use store::canvas::CanvasStore;
pub use store::id::CanvasId;
pub use store::stripes::{LockMode, StripeGuard, StripedRwLock};
