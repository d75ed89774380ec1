//! The decoder's terminal output type.

/// Converts an `(x,y)` position within a given `width` 2D space into a
/// linear pixel index.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

/// A decoded image: normalized RGBA floats, four per pixel.
///
/// `pixels` is row-major with row 0 at the **top** of the image, holding
/// `width * height * 4` values, each in `[0, 1]`, in R,G,B,A order. All
/// palette, transparency, and gamma handling has already happened; there's
/// nothing left to interpret.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
  pub width: u32,
  pub height: u32,
  pub pixels: Vec<f32>,
}

impl Image {
  /// Gets the RGBA value at the position, or `None` if the position is out
  /// of bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<[f32; 4]> {
    if x < self.width && y < self.height {
      let i = xy_width_to_index(x, y, self.width) * 4;
      Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    } else {
      None
    }
  }

  /// Flips the image top to bottom, for callers that want the bottom-up row
  /// convention instead of the decoder's top-down one.
  #[inline]
  pub fn vertical_flip(&mut self) {
    let row_len = (self.width as usize) * 4;
    let mut data: &mut [f32] = self.pixels.as_mut_slice();
    let mut temp_height = self.height;
    while temp_height > 1 {
      let (low, mid) = data.split_at_mut(row_len);
      let (mid, high) = mid.split_at_mut(mid.len() - row_len);
      low.swap_with_slice(high);
      data = mid;
      temp_height -= 2;
    }
  }
}
