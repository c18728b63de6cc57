use rk_core::{Error, Image, ImageView, ImageViewMut, clamp_index};

/// Binomial 5x5 kernel `[1 4 6 4 1] x [1 4 6 4 1]`, sum 256.
const KERNEL: [[f32; 5]; 5] = [
    [1.0, 4.0, 6.0, 4.0, 1.0],
    [4.0, 16.0, 24.0, 16.0, 4.0],
    [6.0, 24.0, 36.0, 24.0, 6.0],
    [4.0, 16.0, 24.0, 16.0, 4.0],
    [1.0, 4.0, 6.0, 4.0, 1.0],
];
const KERNEL_SUM: f32 = 256.0;

/// Gaussian 5x5 blur over a row-major grayscale buffer.
///
/// Accumulates in `f32`, divides by the kernel sum and rounds half up back
/// to `u8`. Borders replicate the nearest edge pixel. Same buffer contract
/// as `rk_morph::dilate3x3_u8`: the call fully populates the first
/// `width * height` bytes of `output` or fails without touching it.
///
/// # Errors
/// [`Error::EmptyImage`] if `width` or `height` is zero,
/// [`Error::SizeMismatch`] if either buffer is too short.
pub fn gaussian5x5_u8(
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
    blur_rows(&src, &mut dst);
    Ok(())
}

/// View-based variant of [`gaussian5x5_u8`].
pub fn gaussian5x5_blur_u8_into(
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

    blur_rows(src, dst);
    Ok(())
}

/// Allocating convenience wrapper. Empty inputs yield an empty image.
pub fn gaussian5x5_blur_u8(src: &ImageView<'_, u8>) -> Image<u8> {
    let mut out = Image::new_fill(src.width(), src.height(), 0u8);
    if src.width() == 0 || src.height() == 0 {
        return out;
    }

    let mut dst = out.as_view_mut();
    blur_rows(src, &mut dst);
    out
}

fn blur_rows(src: &ImageView<'_, u8>, dst: &mut ImageViewMut<'_, u8>) {
    let width = src.width();
    let height = src.height();

    for y in 0..height {
        let rows = [
            src.row(clamp_index(y as isize - 2, height)),
            src.row(clamp_index(y as isize - 1, height)),
            src.row(y),
            src.row(clamp_index(y as isize + 1, height)),
            src.row(clamp_index(y as isize + 2, height)),
        ];
        let out_row = dst.row_mut(y);

        for (x, out_px) in out_row.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (taps, row) in KERNEL.iter().zip(rows) {
                for (k, &weight) in taps.iter().enumerate() {
                    let sx = clamp_index(x as isize + k as isize - 2, width);
                    acc += f32::from(row[sx]) * weight;
                }
            }
            *out_px = (acc / KERNEL_SUM + 0.5) as u8;
        }
    }
}
