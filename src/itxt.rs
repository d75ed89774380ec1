//! International text (`iTXt`) decoding.
//!
//! The payload is five NUL-delimited fields:
//! `keyword \0 compression_flag compression_method language_tag \0
//! translated_keyword \0 text`. The text is UTF-8, optionally zlib
//! compressed. We keep keyword and text and drop the two translation fields,
//! which is all the original files in the wild ever seem to use.

use crate::error::{PngError, PngResult};

/// Decodes an `iTXt` payload into its `(keyword, text)` pair.
pub fn itxt_from_data(data: &[u8]) -> PngResult<(String, String)> {
  let mut fields = data.splitn(2, |&b| b == 0);
  let keyword_bytes = fields.next().ok_or(PngError::Format("text chunk"))?;
  if keyword_bytes.is_empty() || keyword_bytes.len() > 79 {
    return Err(PngError::Format("text chunk"));
  }
  // keywords are Latin-1, which maps 1:1 onto the first 256 scalar values.
  let keyword: String = keyword_bytes.iter().map(|&b| char::from(b)).collect();
  let rest = fields.next().ok_or(PngError::Format("text chunk"))?;
  let [compressed, method, rest @ ..] = rest else {
    return Err(PngError::Format("text chunk"));
  };
  if *compressed > 1 || (*compressed == 1 && *method != 0) {
    return Err(PngError::Format("text chunk"));
  }
  // skip the language tag and the translated keyword.
  let mut fields = rest.splitn(3, |&b| b == 0);
  let _language_tag = fields.next().ok_or(PngError::Format("text chunk"))?;
  let _translated = fields.next().ok_or(PngError::Format("text chunk"))?;
  let text_bytes = fields.next().ok_or(PngError::Format("text chunk"))?;
  let text = if *compressed == 1 {
    let inflated = miniz_oxide::inflate::decompress_to_vec_zlib(text_bytes)
      .map_err(|_| PngError::Format("text chunk"))?;
    String::from_utf8(inflated).map_err(|_| PngError::Format("text chunk"))?
  } else {
    core::str::from_utf8(text_bytes).map_err(|_| PngError::Format("text chunk"))?.to_string()
  };
  Ok((keyword, text))
}
