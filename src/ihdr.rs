//! The image header, which every other stage of the decode depends on.

use crate::chunk::{ChunkTy, RawChunk};
use crate::error::{PngError, PngResult};

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  ///
  /// The palette has RGB8 entries. There may optionally be a transparency
  /// chunk giving per-entry alpha.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl PngColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Y => 1,
      Self::RGB => 3,
      Self::Index => 1,
      Self::YA => 2,
      Self::RGBA => 4,
    }
  }

  /// The bit depths a conforming header may declare for this color type.
  #[inline]
  #[must_use]
  pub const fn allowed_bit_depths(self) -> &'static [u8] {
    match self {
      Self::Y => &[1, 2, 4, 8, 16],
      Self::RGB => &[8, 16],
      Self::Index => &[1, 2, 4, 8],
      Self::YA => &[8, 16],
      Self::RGBA => &[8, 16],
    }
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> PngResult<Self> {
    Ok(match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      3 => PngColorType::Index,
      4 => PngColorType::YA,
      6 => PngColorType::RGBA,
      _ => return Err(PngError::Format("color type")),
    })
  }
}

/// Image Header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IHDR {
  /// width in pixels, 1 through `2^31 - 1`.
  pub width: u32,
  /// height in pixels, 1 through `2^31 - 1`.
  pub height: u32,
  /// bits per channel, one of 1, 2, 4, 8, or 16 (color type permitting).
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// if the image data is stored Adam7 interlaced.
  ///
  /// A set flag still parses (it's legal PNG), but this crate refuses to
  /// *decode* interlaced data. Please don't make new interlaced images.
  pub is_interlaced: bool,
}

impl IHDR {
  /// Decodes the 13-byte IHDR payload.
  pub fn from_chunk(chunk: RawChunk<'_>) -> PngResult<Self> {
    if chunk.ty() != ChunkTy::IHDR {
      return Err(PngError::Format("chunk order"));
    }
    let [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression, filter, interlace] =
      *chunk.data()
    else {
      return Err(PngError::Format("header length"));
    };
    let width = u32::from_be_bytes([w0, w1, w2, w3]);
    let height = u32::from_be_bytes([h0, h1, h2, h3]);
    if width < 1 || width > 0x7FFF_FFFF || height < 1 || height > 0x7FFF_FFFF {
      return Err(PngError::Format("image size"));
    }
    if compression != 0 || filter != 0 || interlace > 1 {
      return Err(PngError::Format("header method"));
    }
    let color_type = PngColorType::try_from(color_type)?;
    if !color_type.allowed_bit_depths().contains(&bit_depth) {
      return Err(PngError::Format("bit depth"));
    }
    Ok(Self { width, height, bit_depth, color_type, is_interlaced: interlace == 1 })
  }

  /// Bits for one complete pixel (all channels).
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }

  /// Bytes for one complete pixel, rounded up.
  ///
  /// This is also the byte distance of the "left" neighbor during
  /// unfiltering, so sub-byte formats round up to 1.
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(&self) -> usize {
    (self.bits_per_pixel() + 7) / 8
  }

  /// Bytes of pixel data in one scanline (filter byte *not* included).
  ///
  /// Sub-byte formats can end with a partial byte, so we round up.
  #[inline]
  #[must_use]
  pub const fn bytes_per_scanline(&self) -> usize {
    (self.bits_per_pixel() * (self.width as usize) + 7) / 8
  }

  /// Bytes of one filtered line: a leading filter-type byte plus the
  /// scanline itself.
  #[inline]
  #[must_use]
  pub const fn bytes_per_filterline(&self) -> usize {
    1 + self.bytes_per_scanline()
  }

  /// The exact decompressed size of the (non-interlaced) IDAT stream.
  #[inline]
  pub fn decompressed_len(&self) -> PngResult<usize> {
    self
      .bytes_per_filterline()
      .checked_mul(self.height as usize)
      .ok_or(PngError::Format("image size"))
  }
}
