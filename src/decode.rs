//! The full decode pipeline, start to finish.

use std::collections::BTreeMap;

use crate::chunk::{ChunkTy, RawChunk, RawChunkIter};
use crate::error::{PngError, PngResult};
use crate::gama::gamma_from_data;
use crate::ihdr::{PngColorType, IHDR};
use crate::image::Image;
use crate::itxt::itxt_from_data;
use crate::pixel_formats::RGB8;
use crate::plte::plte_entries;
use crate::resolve::resolve_pixels;
use crate::samples::unpack_samples;
use crate::trns::Transparency;
use crate::unfilter::unfilter_in_place;

/// Decoding refuses images wider or taller than this.
///
/// The format allows up to `2^31 - 1` on each axis, but a header like that is
/// a multi-terabyte allocation request, not an image. Real files sit far
/// below this cap.
pub const MAX_DIMENSION: u32 = 16_384;

/// A fully decoded PNG.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Png {
  /// The pixel data, resolved all the way to normalized RGBA floats.
  pub image: Image,
  /// The file's gamma, if it declared one. The correction has already been
  /// applied to [image](Self::image); this is informational.
  pub gamma: Option<f32>,
  /// Keyword/text pairs from the file's `iTXt` chunks.
  pub tags: BTreeMap<String, String>,
  /// Ancillary chunks this crate doesn't interpret, in file order.
  ///
  /// Their CRCs were verified, but the data is otherwise untouched.
  pub spare_chunks: Vec<(ChunkTy, Vec<u8>)>,
}

impl Png {
  /// Decodes a complete PNG datastream.
  ///
  /// The input must be the whole file, signature through IEND. Decoding is
  /// strict: a malformed file gives [`PngError::Format`] naming the first
  /// problem found, a legal-but-interlaced file (or one with an unknown
  /// critical chunk) gives [`PngError::Unsupported`], and nothing partial is
  /// ever returned.
  pub fn from_bytes(bytes: &[u8]) -> PngResult<Self> {
    let mut it = RawChunkIter::new(bytes)?;

    let first = it.next().ok_or(PngError::Format("truncated chunk"))??;
    let header = IHDR::from_chunk(first)?;
    if header.width > MAX_DIMENSION || header.height > MAX_DIMENSION {
      return Err(PngError::DimensionsTooLarge);
    }
    if header.is_interlaced {
      return Err(PngError::Unsupported("interlacing"));
    }

    let mut palette: Option<&[RGB8]> = None;
    let mut trns: Option<Transparency<'_>> = None;
    let mut gamma: Option<f32> = None;
    let mut idat: Vec<u8> = Vec::new();
    let mut seen_idat = false;
    let mut seen_iend = false;
    let mut tags: BTreeMap<String, String> = BTreeMap::new();
    let mut spare_chunks: Vec<(ChunkTy, Vec<u8>)> = Vec::new();

    for chunk in &mut it {
      let chunk: RawChunk<'_> = chunk?;
      match chunk.ty() {
        ChunkTy::IHDR => return Err(PngError::Format("chunk ordering")),
        ChunkTy::PLTE => {
          if palette.is_some() || seen_idat {
            return Err(PngError::Format("chunk ordering"));
          }
          palette = Some(plte_entries(&header, chunk.data())?);
        }
        ChunkTy::gAMA => {
          // gAMA must come before both PLTE and the image data.
          if gamma.is_some() || palette.is_some() || seen_idat {
            return Err(PngError::Format("chunk ordering"));
          }
          gamma = Some(gamma_from_data(chunk.data())?);
        }
        ChunkTy::tRNS => {
          if trns.is_some() || seen_idat {
            return Err(PngError::Format("chunk ordering"));
          }
          let palette_len = match (header.color_type, palette) {
            (PngColorType::Index, Some(p)) => p.len(),
            (PngColorType::Index, None) => return Err(PngError::Format("chunk ordering")),
            _ => 0,
          };
          trns = Some(Transparency::from_data(header.color_type, chunk.data(), palette_len)?);
        }
        ChunkTy::IDAT => {
          seen_idat = true;
          idat.extend_from_slice(chunk.data());
        }
        ChunkTy::iTXt => {
          let (keyword, text) = itxt_from_data(chunk.data())?;
          tags.insert(keyword, text);
        }
        ChunkTy::IEND => {
          if !chunk.data().is_empty() {
            return Err(PngError::Format("chunk order"));
          }
          seen_iend = true;
          break;
        }
        other if other.is_ancillary() => {
          spare_chunks.push((other, chunk.data().to_vec()));
        }
        _ => return Err(PngError::Unsupported("critical chunk")),
      }
    }
    if !seen_iend || !it.remaining().is_empty() {
      return Err(PngError::Format("chunk order"));
    }
    if !seen_idat {
      return Err(PngError::Format("missing image data"));
    }
    if header.color_type == PngColorType::Index && palette.is_none() {
      return Err(PngError::Format("missing palette"));
    }

    let mut decompressed = miniz_oxide::inflate::decompress_to_vec_zlib(&idat)
      .map_err(|_| PngError::Format("compressed data"))?;
    unfilter_in_place(&header, &mut decompressed)?;
    let samples = unpack_samples(&header, &decompressed);
    let image = resolve_pixels(&header, &samples, palette, trns, gamma)?;

    Ok(Self { image, gamma, tags, spare_chunks })
  }
}
