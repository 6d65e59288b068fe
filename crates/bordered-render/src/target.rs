//! Render target size limits.

use bordered_core::RenderError;

/// Largest canvas edge, in pixels, either renderer accepts.
pub const MAX_TARGET_DIMENSION: u32 = 16384;

/// Byte length of a tightly packed RGBA8 target of the given size.
///
/// Fails with [`RenderError::InvalidTarget`] when either edge is zero or
/// larger than `max_dimension`, or when the length does not fit in `usize`.
pub fn rgba_buffer_len(
    width: u32,
    height: u32,
    max_dimension: u32,
) -> Result<usize, RenderError> {
    let invalid = || RenderError::InvalidTarget { width, height };
    if width == 0 || height == 0 || width > max_dimension || height > max_dimension {
        return Err(invalid());
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_len() {
        assert_eq!(rgba_buffer_len(3, 2, MAX_TARGET_DIMENSION).unwrap(), 24);
        assert_eq!(
            rgba_buffer_len(MAX_TARGET_DIMENSION, MAX_TARGET_DIMENSION, MAX_TARGET_DIMENSION)
                .unwrap(),
            16384 * 16384 * 4
        );
    }

    #[test]
    fn test_empty_and_oversized_rejected() {
        for (w, h) in [(0, 10), (10, 0), (MAX_TARGET_DIMENSION + 1, 1), (65536, 65536)] {
            assert!(matches!(
                rgba_buffer_len(w, h, MAX_TARGET_DIMENSION),
                Err(RenderError::InvalidTarget { width, height }) if (width, height) == (w, h)
            ));
        }
    }

    #[test]
    fn test_custom_limit() {
        assert!(rgba_buffer_len(2048, 2048, 2048).is_ok());
        assert!(rgba_buffer_len(4096, 2160, 2048).is_err());
    }
}
