//! The raw pixel-ish types that appear inside a PNG datastream.
//!
//! The decoder's *output* is always normalized `f32` RGBA (see
//! [`Image`](crate::Image)), so there's not much here: just the plain-old-data
//! shapes we need to view chunk payloads without copying them.

use bytemuck::{Pod, Zeroable};

/// An RGB value, 8-bits per channel.
///
/// This is the entry type of the `PLTE` chunk. Palette entries never carry
/// alpha directly; a separate `tRNS` chunk can override the implied 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct RGB8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

impl RGB8 {
  /// Normalizes each channel into `[0, 1]`, with the given alpha appended.
  #[inline]
  #[must_use]
  pub fn to_rgba_f32(self, alpha: f32) -> [f32; 4] {
    [f32::from(self.r) / 255.0, f32::from(self.g) / 255.0, f32::from(self.b) / 255.0, alpha]
  }
}
