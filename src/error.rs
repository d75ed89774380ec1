use core::fmt::{Display, Formatter};

/// An error from the `pnglet` crate.
///
/// PNG decoding is deterministic: any error means the input is malformed or
/// asks for something this crate doesn't do, never a transient condition.
/// There's no point retrying a failed decode with the same bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PngError {
  /// The bytes violate the PNG grammar in some way.
  ///
  /// The payload names the offending field or chunk ("signature",
  /// "chunk crc", "filter type", and so on). Nothing partial is ever
  /// returned, decoding aborts on the first violation.
  Format(&'static str),

  /// The bytes are well-formed PNG, but use a feature this crate doesn't
  /// decode (currently interlacing and unknown critical chunks).
  ///
  /// This is distinct from [`Format`](Self::Format) so that callers can tell
  /// "broken file" apart from "fine file, limited decoder".
  Unsupported(&'static str),

  /// The declared dimensions exceed the decoder's safety cap.
  ///
  /// [`Png::from_bytes`](crate::Png::from_bytes) refuses images wider or
  /// taller than 16,384 pixels to prevent accidental out-of-memory problems.
  /// The limit is a guard of this decoder, not a rule of the format.
  DimensionsTooLarge,
}

impl Display for PngError {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    match self {
      PngError::Format(what) => write!(f, "incorrect {what}"),
      PngError::Unsupported(what) => write!(f, "unsupported {what}"),
      PngError::DimensionsTooLarge => write!(f, "image dimensions exceed the decoder cap"),
    }
  }
}

impl std::error::Error for PngError {}

/// Alias for a `Result` with [PngError] errors.
pub type PngResult<T> = Result<T, PngError>;
