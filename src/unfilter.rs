//! Reversing the per-scanline filters.
//!
//! From the PNG spec:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the bit
//! > depth or color type of the image.
//!
//! Each filtered line is a filter-type byte followed by the scanline. The
//! "left" neighbor of a byte is the byte one whole pixel back
//! ([`bytes_per_pixel`](crate::IHDR::bytes_per_pixel), so 1 for sub-byte
//! formats), "up" is the same offset within the previous *reconstructed*
//! line, and missing neighbors (first pixel, first line) count as zero. That
//! previous-line dependency is why unfiltering is strictly top-to-bottom.

use crate::error::{PngError, PngResult};
use crate::ihdr::IHDR;

/// Reconstruct Filter Type 1 ("Sub"): add the reconstructed left byte.
const fn reconstruct_sub(fx: u8, ra: u8) -> u8 {
  fx.wrapping_add(ra)
}

/// Reconstruct Filter Type 2 ("Up"): add the reconstructed byte above.
const fn reconstruct_up(fx: u8, rb: u8) -> u8 {
  fx.wrapping_add(rb)
}

/// Reconstruct Filter Type 3 ("Average"): add the floored mean of left and
/// up. The sum is taken at full precision before halving; `left + up` can
/// exceed a byte and must not wrap early.
const fn reconstruct_average(fx: u8, ra: u8, rb: u8) -> u8 {
  fx.wrapping_add(((ra as u32 + rb as u32) / 2) as u8)
}

/// Reconstruct Filter Type 4 ("Paeth"): add whichever of left/up/upper-left
/// is closest to the linear predictor.
const fn reconstruct_paeth(fx: u8, ra: u8, rb: u8, rc: u8) -> u8 {
  fx.wrapping_add(paeth_predictor(ra, rb, rc))
}

/// The Paeth predictor of the three neighboring bytes (left `a`, above `b`,
/// upper left `c`).
const fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
  // Note: the PNG spec says the predictor math shall be performed exactly,
  // without overflow, and that the order of the tie-breaking tests shall not
  // be altered. i32 is wide enough for any u8 inputs.
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Unfilters the decompressed IDAT bytes in place.
///
/// `decompressed` must be exactly `height` filtered lines of
/// [`bytes_per_filterline`](IHDR::bytes_per_filterline) bytes each. After a
/// successful call every line holds its reconstructed scanline (the filter
/// bytes are left in place but no longer meaningful).
pub fn unfilter_in_place(header: &IHDR, decompressed: &mut [u8]) -> PngResult<()> {
  let stride = header.bytes_per_filterline();
  if decompressed.len() != header.decompressed_len()? {
    return Err(PngError::Format("compressed data"));
  }
  let bpp = header.bytes_per_pixel();
  let mut prev: &[u8] = &[];
  for filterline in decompressed.chunks_exact_mut(stride) {
    let (filter_ty, line) = filterline.split_first_mut().unwrap();
    match *filter_ty {
      0 => (),
      1 => {
        for x in bpp..line.len() {
          line[x] = reconstruct_sub(line[x], line[x - bpp]);
        }
      }
      2 => {
        if !prev.is_empty() {
          for x in 0..line.len() {
            line[x] = reconstruct_up(line[x], prev[x]);
          }
        }
      }
      3 => {
        for x in 0..line.len() {
          let left = if x >= bpp { line[x - bpp] } else { 0 };
          let up = if prev.is_empty() { 0 } else { prev[x] };
          line[x] = reconstruct_average(line[x], left, up);
        }
      }
      4 => {
        for x in 0..line.len() {
          let left = if x >= bpp { line[x - bpp] } else { 0 };
          let (up, up_left) = if prev.is_empty() {
            (0, 0)
          } else {
            (prev[x], if x >= bpp { prev[x - bpp] } else { 0 })
          };
          line[x] = reconstruct_paeth(line[x], left, up, up_left);
        }
      }
      _ => return Err(PngError::Format("filter type")),
    }
    prev = line;
  }
  Ok(())
}
