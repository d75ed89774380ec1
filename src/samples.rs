//! Unpacking reconstructed scanlines into whole samples.
//!
//! After unfiltering, a scanline is still packed the way the encoder wrote
//! it: sub-byte samples are crammed most-significant-bit-first into bytes,
//! and 16-bit samples are big-endian pairs. This module flattens everything
//! into one `u16` per sample, `width * height * channels` of them, row-major
//! with **row 0 being the top of the image** (the first scanline in the
//! stream).

use crate::ihdr::IHDR;

/// Unpacks unfiltered scanline data into a flat sample vector.
///
/// `reconstructed` is the buffer after
/// [`unfilter_in_place`](crate::unfilter::unfilter_in_place): `height` lines
/// of filter byte plus packed scanline. The filter bytes are skipped, not
/// interpreted.
#[must_use]
pub fn unpack_samples(header: &IHDR, reconstructed: &[u8]) -> Vec<u16> {
  let width = header.width as usize;
  let channels = header.color_type.channel_count();
  let depth = usize::from(header.bit_depth);
  let mut out: Vec<u16> = Vec::with_capacity(width * (header.height as usize) * channels);
  for filterline in reconstructed.chunks_exact(header.bytes_per_filterline()) {
    let line = &filterline[1..];
    if depth < 8 {
      // sub-byte packing only happens for single-channel formats, so each
      // pixel is exactly one sample, MSB first within each byte.
      debug_assert_eq!(channels, 1);
      let mask = (1_u16 << depth) - 1;
      for x in 0..width {
        let bit = x * depth;
        let shift = 8 - depth - (bit % 8);
        out.push((u16::from(line[bit / 8]) >> shift) & mask);
      }
    } else if depth == 8 {
      out.extend(line[..width * channels].iter().copied().map(u16::from));
    } else {
      for pair in line[..width * channels * 2].chunks_exact(2) {
        out.push(u16::from_be_bytes([pair[0], pair[1]]));
      }
    }
  }
  out
}
