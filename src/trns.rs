//! Transparency (`tRNS`) decoding.
//!
//! What the chunk means depends on the color type:
//! * Greyscale: one big-endian u16, the exact sample value that's transparent.
//! * RGB: three big-endian u16s, the exact triple that's transparent.
//! * Indexed: one alpha byte per palette entry (may cover fewer entries than
//!   the palette; the rest stay opaque).
//! * Greyscale+alpha and RGBA already carry alpha, so the chunk is illegal.

use crate::error::{PngError, PngResult};
use crate::ihdr::PngColorType;

/// Transparency data, interpreted against a color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transparency<'b> {
  /// The greyscale sample value that decodes as fully transparent.
  Y { y: u16 },
  /// The RGB sample triple that decodes as fully transparent.
  RGB { r: u16, g: u16, b: u16 },
  /// Per-palette-entry alpha values.
  Index { alphas: &'b [u8] },
}

impl<'b> Transparency<'b> {
  /// Interprets a `tRNS` payload for the given color type.
  ///
  /// `palette_len` is the entry count of the already-decoded palette; the
  /// alpha table of an indexed image must not exceed it.
  pub fn from_data(
    color_type: PngColorType, data: &'b [u8], palette_len: usize,
  ) -> PngResult<Self> {
    match color_type {
      PngColorType::Y => match *data {
        [y0, y1] => Ok(Self::Y { y: u16::from_be_bytes([y0, y1]) }),
        _ => Err(PngError::Format("transparency size")),
      },
      PngColorType::RGB => match *data {
        [r0, r1, g0, g1, b0, b1] => Ok(Self::RGB {
          r: u16::from_be_bytes([r0, r1]),
          g: u16::from_be_bytes([g0, g1]),
          b: u16::from_be_bytes([b0, b1]),
        }),
        _ => Err(PngError::Format("transparency size")),
      },
      PngColorType::Index => {
        if data.len() > palette_len {
          Err(PngError::Format("transparency size"))
        } else {
          Ok(Self::Index { alphas: data })
        }
      }
      PngColorType::YA | PngColorType::RGBA => Err(PngError::Format("transparency color type")),
    }
  }
}
