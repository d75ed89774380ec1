//! Splitting a PNG datastream into its chunks.
//!
//! A PNG is an 8-byte signature followed by a series of chunks, each one
//! `length:u32be | type:4 bytes | data:length bytes | crc:u32be`. The
//! [`RawChunkIter`] walks that grammar strictly: every structural problem
//! (short record, garbage type, wrong CRC) comes out as an `Err` item rather
//! than being silently skipped, because a damaged chunk stream means the rest
//! of the file can't be trusted either.

use core::fmt::{Debug, Write};

use crate::crc32::png_crc;
use crate::error::{PngError, PngResult};

/// The first eight bytes of any PNG datastream.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the bytes open with the PNG signature.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// A chunk's 4-byte type code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkTy(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkTy {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  pub const tRNS: Self = Self(*b"tRNS");
  pub const gAMA: Self = Self(*b"gAMA");
  pub const iTXt: Self = Self(*b"iTXt");

  /// An ancillary chunk (bit 5 of the first byte set, i.e. lowercase) is one
  /// a decoder may ignore without giving up on the image. Critical chunks
  /// must be understood or the decode fails.
  #[inline]
  #[must_use]
  pub const fn is_ancillary(self) -> bool {
    (self.0[0] & 0b10_0000) != 0
  }

  /// A legal type code is 4 ASCII letters with the reserved bit (bit 5 of
  /// the third byte) clear.
  #[inline]
  #[must_use]
  pub const fn is_well_formed(self) -> bool {
    self.0[0].is_ascii_alphabetic()
      && self.0[1].is_ascii_alphabetic()
      && self.0[2].is_ascii_uppercase()
      && self.0[3].is_ascii_alphabetic()
  }
}
impl Debug for ChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char(self.0[0] as char)?;
    f.write_char(self.0[1] as char)?;
    f.write_char(self.0[2] as char)?;
    f.write_char(self.0[3] as char)?;
    Ok(())
  }
}

/// An unparsed chunk, CRC already verified.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'b> {
  pub(crate) ty: ChunkTy,
  pub(crate) data: &'b [u8],
}
impl<'b> RawChunk<'b> {
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> ChunkTy {
    self.ty
  }
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
}
impl Debug for RawChunk<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .finish()
  }
}

/// An iterator over the chunks of a PNG datastream.
///
/// Yields `Err` once and then ends if the stream breaks the chunk grammar.
/// Chunk *ordering* rules are not this type's business; the decode driver
/// checks those (it's the one that knows which chunk should come when).
#[derive(Debug, Clone)]
pub struct RawChunkIter<'b> {
  spare: &'b [u8],
  poisoned: bool,
}
impl<'b> RawChunkIter<'b> {
  /// Pass the full PNG bytes, signature included.
  ///
  /// Fails with `Format("signature")` when the magic bytes are wrong: if the
  /// signature is bad then the rest of the buffer is almost certainly not
  /// PNG data at all, and any "chunks" we'd find in it would be nonsense.
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> PngResult<Self> {
    match bytes {
      [137, 80, 78, 71, 13, 10, 26, 10, rest @ ..] => Ok(Self { spare: rest, poisoned: false }),
      _ => Err(PngError::Format("signature")),
    }
  }

  /// Bytes not yet consumed by the iterator.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> &'b [u8] {
    self.spare
  }

  fn next_chunk(&mut self) -> PngResult<RawChunk<'b>> {
    // a chunk record is at least 12 bytes even with no data.
    if self.spare.len() < 12 {
      return Err(PngError::Format("truncated chunk"));
    }
    let (len_bytes, rest) = self.spare.split_at(4);
    let chunk_len = u32::from_be_bytes(len_bytes.try_into().unwrap()) as usize;
    let (ty_bytes, rest) = rest.split_at(4);
    let ty = ChunkTy(ty_bytes.try_into().unwrap());
    if !ty.is_well_formed() {
      return Err(PngError::Format("chunk type"));
    }
    // checked: `chunk_len + 4` could wrap usize on 32-bit targets.
    if rest.len().checked_sub(4).map_or(true, |n| n < chunk_len) {
      return Err(PngError::Format("truncated chunk"));
    }
    let (data, rest) = rest.split_at(chunk_len);
    let (crc_bytes, rest) = rest.split_at(4);
    let declared_crc = u32::from_be_bytes(crc_bytes.try_into().unwrap());
    if png_crc(ty.0.iter().copied().chain(data.iter().copied())) != declared_crc {
      return Err(PngError::Format("chunk crc"));
    }
    self.spare = rest;
    Ok(RawChunk { ty, data })
  }
}
impl<'b> Iterator for RawChunkIter<'b> {
  type Item = PngResult<RawChunk<'b>>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.poisoned || self.spare.is_empty() {
      return None;
    }
    let out = self.next_chunk();
    if out.is_err() {
      self.poisoned = true;
    }
    Some(out)
  }
}
