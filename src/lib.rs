#![forbid(unsafe_code)]

//! A small, strict PNG decoder.
//!
//! Hand the whole file to [`Png::from_bytes`] and you get back normalized
//! float RGBA pixels with palette, transparency, and gamma already resolved:
//!
//! ```no_run
//! let bytes = std::fs::read("some.png").unwrap();
//! let png = pnglet::Png::from_bytes(&bytes).unwrap();
//! let [r, g, b, a] = png.image.get(0, 0).unwrap();
//! ```
//!
//! "Strict" means every structural rule of the format is enforced: CRCs,
//! chunk ordering, declared lengths, palette bounds, all of it. A file that
//! breaks a rule gets an [`Err`] naming the problem instead of a best-effort
//! image. Interlaced files are rejected as [unsupported](PngError::Unsupported)
//! rather than malformed.
//!
//! The intermediate stages (chunk walking, unfiltering, sample unpacking) are
//! public too, for anyone who wants to run part of the pipeline themselves.

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod pixel_formats;
pub use pixel_formats::*;

pub mod error;
pub use error::*;

pub mod crc32;
pub use crc32::*;

pub mod chunk;
pub use chunk::*;

pub mod ihdr;
pub use ihdr::*;

pub mod plte;
pub use plte::*;

pub mod trns;
pub use trns::*;

pub mod gama;
pub use gama::*;

pub mod itxt;
pub use itxt::*;

pub mod unfilter;
pub use unfilter::*;

pub mod samples;
pub use samples::*;

pub mod image;
pub use image::*;

pub mod resolve;
pub use resolve::*;

pub mod decode;
pub use decode::*;
