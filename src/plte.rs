//! Palette (`PLTE`) decoding.

use crate::error::{PngError, PngResult};
use crate::ihdr::IHDR;
use crate::pixel_formats::RGB8;

/// Views a `PLTE` payload as its RGB entries.
///
/// The payload must be a whole number of RGB triples, and the entry count
/// must fit the header's bit depth (you can't index entry 200 of a 4-bit
/// image, so a conforming encoder never writes one).
pub fn plte_entries<'b>(header: &IHDR, data: &'b [u8]) -> PngResult<&'b [RGB8]> {
  let entries: &[RGB8] =
    bytemuck::try_cast_slice(data).map_err(|_| PngError::Format("palette size"))?;
  if entries.is_empty() || entries.len() > (1 << header.bit_depth.min(8)) {
    return Err(PngError::Format("palette size"));
  }
  Ok(entries)
}
