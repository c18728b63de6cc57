//! Grayscale morphological dilation, 3x3 all-ones structuring element.
//!
//! This is the reference against which accelerated dilation kernels are
//! checked bit-exact: every output pixel is the maximum `u8` value in its
//! 3x3 neighborhood (itself included), with out-of-bounds neighbors clamped
//! to the nearest edge pixel.

use rk_core::{Error, Image, ImageView, ImageViewMut, clamp_index};

/// Dilates a row-major grayscale buffer into a caller-owned output buffer.
///
/// `input` and `output` must each hold at least `width * height` bytes;
/// extra tail bytes are ignored and never written. The call either fully
/// populates the first `width * height` bytes of `output` or fails without
/// touching it. In-place operation is not supported: `input` and `output`
/// must be distinct buffers, which the `&`/`&mut` signature already enforces
/// for safe callers.
///
/// # Errors
/// [`Error::EmptyImage`] if `width` or `height` is zero,
/// [`Error::SizeMismatch`] if either buffer is too short or
/// `width * height` overflows.
pub fn dilate3x3_u8(
    input: &[u8],
    output: &mut [u8],
    width: usize,
    height: usize,
) -> Result<(), Error> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }

    let src = ImageView::from_slice(width, height, width, input)?;
    let mut dst = ImageViewMut::from_slice_mut(width, height, width, output)?;
    dilate_rows(&src, &mut dst);
    Ok(())
}

/// View-based variant of [`dilate3x3_u8`] for padded or borrowed buffers.
///
/// Source and destination must have identical width and height; strides may
/// differ.
pub fn dilate3x3_max_u8_into(
    src: &ImageView<'_, u8>,
    dst: &mut ImageViewMut<'_, u8>,
) -> Result<(), Error> {
    if src.width() == 0 || src.height() == 0 {
        return Err(Error::EmptyImage);
    }
    if dst.width() != src.width() || dst.height() != src.height() {
        return Err(Error::SizeMismatch {
            expected: src.width() * src.height(),
            actual: dst.width() * dst.height(),
        });
    }

    dilate_rows(src, dst);
    Ok(())
}

/// Allocating convenience wrapper. Empty inputs yield an empty image.
pub fn dilate3x3_max_u8(src: &ImageView<'_, u8>) -> Image<u8> {
    let mut out = Image::new_fill(src.width(), src.height(), 0u8);
    if src.width() == 0 || src.height() == 0 {
        return out;
    }

    let mut dst = out.as_view_mut();
    dilate_rows(src, &mut dst);
    out
}

/// Dimensions are validated by the callers; this loop never reads or writes
/// outside the first `width` elements of any row.
fn dilate_rows(src: &ImageView<'_, u8>, dst: &mut ImageViewMut<'_, u8>) {
    let width = src.width();
    let height = src.height();

    for y in 0..height {
        let above = src.row(clamp_index(y as isize - 1, height));
        let here = src.row(y);
        let below = src.row(clamp_index(y as isize + 1, height));
        let out_row = dst.row_mut(y);

        for (x, out_px) in out_row.iter_mut().enumerate() {
            let left = clamp_index(x as isize - 1, width);
            let right = clamp_index(x as isize + 1, width);

            let mut max_val = 0u8;
            for row in [above, here, below] {
                max_val = max_val.max(row[left]).max(row[x]).max(row[right]);
            }
            *out_px = max_val;
        }
    }
}

#[cfg(test)]
mod tests {
    use rk_core::{Error, Image, ImageView, ImageViewMut};

    use crate::{dilate3x3_max_u8, dilate3x3_max_u8_into, dilate3x3_u8};

    fn dilate_vec(width: usize, height: usize, data: Vec<u8>) -> Vec<u8> {
        let mut out = vec![0u8; data.len()];
        dilate3x3_u8(&data, &mut out, width, height).expect("valid call");
        out
    }

    #[test]
    fn uniform_image_is_a_fixed_point() {
        for c in [0u8, 1, 127, 255] {
            let out = dilate_vec(4, 3, vec![c; 12]);
            assert!(out.iter().all(|&v| v == c));
        }
    }

    #[test]
    fn output_never_falls_below_input() {
        let data: Vec<u8> = (0..35).map(|i| ((i * 37) % 256) as u8).collect();
        let out = dilate_vec(7, 5, data.clone());
        for (o, i) in out.iter().zip(&data) {
            assert!(o >= i);
        }
    }

    #[test]
    fn second_application_never_shrinks() {
        let data: Vec<u8> = (0..48).map(|i| ((i * 53) % 256) as u8).collect();
        let once = dilate_vec(8, 6, data);
        let twice = dilate_vec(8, 6, once.clone());
        for (t, o) in twice.iter().zip(&once) {
            assert!(t >= o);
        }
    }

    #[test]
    fn single_pixel_image_replicates_itself() {
        assert_eq!(dilate_vec(1, 1, vec![42]), vec![42]);
    }

    #[test]
    fn single_row_clamps_vertical_neighbors() {
        // Only horizontal neighbors matter; rows above/below replicate.
        assert_eq!(dilate_vec(4, 1, vec![5, 0, 9, 1]), vec![5, 9, 9, 9]);
        assert_eq!(dilate_vec(3, 1, vec![0, 0, 7]), vec![0, 7, 7]);
    }

    #[test]
    fn single_column_clamps_horizontal_neighbors() {
        assert_eq!(dilate_vec(1, 4, vec![5, 0, 9, 1]), vec![5, 9, 9, 9]);
    }

    #[test]
    fn bright_pixel_spreads_to_3x3_block() {
        let mut data = vec![0u8; 25];
        data[12] = 255;
        let out = dilate_vec(5, 5, data);

        for y in 0..5usize {
            for x in 0..5usize {
                let expected = if (1..=3).contains(&x) && (1..=3).contains(&y) {
                    255
                } else {
                    0
                };
                assert_eq!(out[y * 5 + x], expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn known_3x3_case() {
        let out = dilate_vec(
            3,
            3,
            vec![
                1, 2, 3, //
                4, 5, 9, //
                7, 8, 6, //
            ],
        );
        assert_eq!(
            out,
            vec![
                5, 9, 9, //
                9, 9, 9, //
                8, 9, 9, //
            ]
        );
    }

    #[test]
    fn zero_dimension_is_rejected_without_writing() {
        let input = [1u8, 2, 3, 4];
        let mut output = [77u8; 4];

        assert_eq!(dilate3x3_u8(&input, &mut output, 0, 4), Err(Error::EmptyImage));
        assert_eq!(dilate3x3_u8(&input, &mut output, 4, 0), Err(Error::EmptyImage));
        assert_eq!(output, [77u8; 4]);
    }

    #[test]
    fn undersized_buffers_are_rejected_without_writing() {
        let input = [1u8, 2, 3, 4, 5, 6];
        let mut short_out = [9u8; 5];
        assert_eq!(
            dilate3x3_u8(&input, &mut short_out, 3, 2),
            Err(Error::SizeMismatch {
                expected: 6,
                actual: 5
            })
        );
        assert_eq!(short_out, [9u8; 5]);

        let mut output = [9u8; 6];
        assert_eq!(
            dilate3x3_u8(&input[..4], &mut output, 3, 2),
            Err(Error::SizeMismatch {
                expected: 6,
                actual: 4
            })
        );
        assert_eq!(output, [9u8; 6]);
    }

    #[test]
    fn extra_tail_bytes_are_ignored() {
        let input = [0u8, 0, 0, 8, 200, 200];
        let mut output = [0u8; 6];
        dilate3x3_u8(&input, &mut output, 2, 2).expect("valid call");
        assert_eq!(&output[..4], &[8, 8, 8, 8]);
        assert_eq!(&output[4..], &[0, 0]);
    }

    #[test]
    fn view_variant_matches_slice_variant_through_padded_stride() {
        let padded = vec![
            1u8, 2, 3, 99, //
            4, 5, 9, 98, //
            7, 8, 6, 97, //
        ];
        let src = ImageView::from_slice(3, 3, 4, &padded).expect("valid view");

        let out = dilate3x3_max_u8(&src);
        assert_eq!(out.data(), &[5, 9, 9, 9, 9, 9, 8, 9, 9]);
    }

    #[test]
    fn into_variant_rejects_dimension_mismatch() {
        let img = Image::from_vec(3, 3, vec![0u8; 9]).expect("valid image");
        let mut small = vec![0u8; 4];
        let mut dst = ImageViewMut::from_slice_mut(2, 2, 2, &mut small).expect("valid view");

        assert!(matches!(
            dilate3x3_max_u8_into(&img.as_view(), &mut dst),
            Err(Error::SizeMismatch { .. })
        ));
    }
}
