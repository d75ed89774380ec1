//! Mapping raw samples to the final float RGBA buffer.

use crate::error::{PngError, PngResult};
use crate::gama::gamma_is_noop;
use crate::ihdr::{PngColorType, IHDR};
use crate::image::Image;
use crate::pixel_formats::RGB8;
use crate::trns::Transparency;

/// Resolves unpacked samples into a finished [Image].
///
/// Direct-color samples are normalized by `2^bit_depth - 1`; indexed samples
/// go through the palette (whose entries are 8-bit regardless of the image's
/// bit depth). Transparency and gamma are folded in here, so the caller gets
/// pixels it can use as-is.
pub fn resolve_pixels(
  header: &IHDR, samples: &[u16], palette: Option<&[RGB8]>, trns: Option<Transparency<'_>>,
  gamma: Option<f32>,
) -> PngResult<Image> {
  let pixel_count = (header.width as usize) * (header.height as usize);
  let mut pixels: Vec<f32> = Vec::with_capacity(pixel_count * 4);
  let one = f32::from((1_u32 << header.bit_depth).wrapping_sub(1) as u16);
  match header.color_type {
    PngColorType::Index => {
      let palette = palette.ok_or(PngError::Format("missing palette"))?;
      let alphas: &[u8] = match trns {
        Some(Transparency::Index { alphas }) => alphas,
        _ => &[],
      };
      // resolve each distinct entry once, then it's a plain lookup per pixel.
      let mut resolved: Vec<[f32; 4]> = Vec::with_capacity(palette.len());
      for (i, entry) in palette.iter().enumerate() {
        let alpha = alphas.get(i).map(|&a| f32::from(a) / 255.0).unwrap_or(1.0);
        resolved.push(entry.to_rgba_f32(alpha));
      }
      for &sample in samples {
        let rgba =
          resolved.get(usize::from(sample)).ok_or(PngError::Format("palette index"))?;
        pixels.extend_from_slice(rgba);
      }
    }
    PngColorType::Y => {
      let transparent = match trns {
        Some(Transparency::Y { y }) => Some(y),
        _ => None,
      };
      for &sample in samples {
        let y = f32::from(sample) / one;
        let a = if transparent == Some(sample) { 0.0 } else { 1.0 };
        pixels.extend_from_slice(&[y, y, y, a]);
      }
    }
    PngColorType::YA => {
      for pair in samples.chunks_exact(2) {
        let y = f32::from(pair[0]) / one;
        pixels.extend_from_slice(&[y, y, y, f32::from(pair[1]) / one]);
      }
    }
    PngColorType::RGB => {
      let transparent = match trns {
        Some(Transparency::RGB { r, g, b }) => Some([r, g, b]),
        _ => None,
      };
      for triple in samples.chunks_exact(3) {
        let a = if transparent == Some([triple[0], triple[1], triple[2]]) { 0.0 } else { 1.0 };
        pixels.extend_from_slice(&[
          f32::from(triple[0]) / one,
          f32::from(triple[1]) / one,
          f32::from(triple[2]) / one,
          a,
        ]);
      }
    }
    PngColorType::RGBA => {
      for quad in samples.chunks_exact(4) {
        pixels.extend_from_slice(&[
          f32::from(quad[0]) / one,
          f32::from(quad[1]) / one,
          f32::from(quad[2]) / one,
          f32::from(quad[3]) / one,
        ]);
      }
    }
  }
  if let Some(gamma) = gamma.filter(|&g| !gamma_is_noop(g)) {
    // the stored value is the *encoding* exponent, so decoding raises to the
    // reciprocal: gAMA 45455 (~1/2.2) means sample^2.2. Alpha is untouched.
    let exponent = 1.0 / gamma;
    for rgba in pixels.chunks_exact_mut(4) {
      for channel in &mut rgba[..3] {
        *channel = channel.powf(exponent);
      }
    }
  }
  Ok(Image { width: header.width, height: header.height, pixels })
}
