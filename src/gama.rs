//! Gamma (`gAMA`) decoding.

use crate::error::{PngError, PngResult};

/// Decodes a `gAMA` payload into the file's gamma value.
///
/// The payload is a u32 holding gamma times 100,000: the common `1/2.2`
/// encoding gamma is stored as `45455`. A stored zero is rejected because the
/// correction exponent is `1/gamma`.
#[inline]
pub fn gamma_from_data(data: &[u8]) -> PngResult<f32> {
  let [g0, g1, g2, g3] = *data else {
    return Err(PngError::Format("gamma"));
  };
  let raw = u32::from_be_bytes([g0, g1, g2, g3]);
  if raw == 0 {
    return Err(PngError::Format("gamma"));
  }
  Ok(raw as f32 / 100_000.0)
}

/// A gamma of exactly 1.0 asks for no correction at all, so the color
/// resolver can skip the pass entirely.
#[inline]
#[must_use]
pub fn gamma_is_noop(gamma: f32) -> bool {
  gamma == 1.0
}
