use rk_core::{Error, Image, ImageView, ImageViewMut};

/// Binarizes a row-major grayscale buffer at `level`.
///
/// Pixels strictly greater than `level` become 255, everything else 0.
/// Same buffer contract as the other reference kernels.
///
/// # Errors
/// [`Error::EmptyImage`] if `width` or `height` is zero,
/// [`Error::SizeMismatch`] if either buffer is too short.
pub fn threshold_u8(
    input: &[u8],
    output: &mut [u8],
    width: usize,
    height: usize,
    level: u8,
) -> Result<(), Error> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }

    let src = ImageView::from_slice(width, height, width, input)?;
    let mut dst = ImageViewMut::from_slice_mut(width, height, width, output)?;
    binarize_rows(&src, &mut dst, level);
    Ok(())
}

/// Allocating convenience wrapper. Empty inputs yield an empty image.
pub fn threshold_binary_u8(src: &ImageView<'_, u8>, level: u8) -> Image<u8> {
    let mut out = Image::new_fill(src.width(), src.height(), 0u8);
    if src.width() == 0 || src.height() == 0 {
        return out;
    }

    let mut dst = out.as_view_mut();
    binarize_rows(src, &mut dst, level);
    out
}

fn binarize_rows(src: &ImageView<'_, u8>, dst: &mut ImageViewMut<'_, u8>, level: u8) {
    for y in 0..src.height() {
        for (out_px, &px) in dst.row_mut(y).iter_mut().zip(src.row(y)) {
            *out_px = if px > level { 255 } else { 0 };
        }
    }
}

#[cfg(test)]
mod tests {
    use rk_core::{Error, Image};

    use crate::{threshold_binary_u8, threshold_u8};

    #[test]
    fn comparison_is_strictly_greater() {
        let input = [99u8, 100, 101, 255];
        let mut output = [0u8; 4];
        threshold_u8(&input, &mut output, 4, 1, 100).expect("valid call");
        assert_eq!(output, [0, 0, 255, 255]);
    }

    #[test]
    fn level_255_maps_everything_to_zero() {
        let input = [0u8, 128, 255];
        let mut output = [7u8; 3];
        threshold_u8(&input, &mut output, 3, 1, 255).expect("valid call");
        assert_eq!(output, [0, 0, 0]);
    }

    #[test]
    fn output_alphabet_is_zero_or_255() {
        let data: Vec<u8> = (0..=255).collect();
        let img = Image::from_vec(16, 16, data).expect("valid image");
        let out = threshold_binary_u8(&img.as_view(), 127);
        assert!(out.data().iter().all(|&v| v == 0 || v == 255));
        assert_eq!(out.data().iter().filter(|&&v| v == 255).count(), 128);
    }

    #[test]
    fn zero_dimension_is_rejected_without_writing() {
        let input = [1u8, 2];
        let mut output = [9u8; 2];
        assert_eq!(
            threshold_u8(&input, &mut output, 0, 2, 10),
            Err(Error::EmptyImage)
        );
        assert_eq!(output, [9u8; 2]);
    }
}
