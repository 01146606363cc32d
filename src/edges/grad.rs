//! Sobel gradient magnitude on 8-bit grayscale grids.
//!
//! - Convolves the 3×3 kernel pair (`X` and `Y`) over interior pixels only.
//! - Writes `min(255, round(sqrt(gx^2 + gy^2)))` per interior pixel.
//! - Leaves row 0, row h-1, column 0 and column w-1 of the output untouched.
//!
//! Complexity: O(W·H) per pass, no allocation beyond the optional output.
use crate::error::KernelError;
use crate::image::{GrayImageU8, ImageU8, ImageView, ImageViewMut};

pub type Kernel3 = [[i32; 3]; 3];

pub const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
pub const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

#[inline]
fn magnitude_u8(sum_x: i32, sum_y: i32) -> u8 {
    let sq = (sum_x * sum_x + sum_y * sum_y) as f64;
    sq.sqrt().round().min(255.0) as u8
}

fn check_dims(input: &ImageU8<'_>, output: &GrayImageU8) -> Result<(), KernelError> {
    if input.w < 3 || input.h < 3 {
        return Err(KernelError::Dimension {
            width: input.w,
            height: input.h,
        });
    }
    if output.width() != input.w || output.height() != input.h {
        return Err(KernelError::ShapeMismatch {
            width: input.w,
            height: input.h,
            output_width: output.width(),
            output_height: output.height(),
        });
    }
    Ok(())
}

fn magnitude_with_kernels(
    input: &ImageU8<'_>,
    output: &mut GrayImageU8,
    kernel_x: &Kernel3,
    kernel_y: &Kernel3,
) {
    let w = input.w;
    let h = input.h;
    for y in 1..h - 1 {
        let rows = [input.row(y - 1), input.row(y), input.row(y + 1)];
        let out = output.row_mut(y);
        for x in 1..w - 1 {
            let mut sum_x = 0i32;
            let mut sum_y = 0i32;
            for (ky, row) in rows.iter().enumerate() {
                let kx_row = &kernel_x[ky];
                let ky_row = &kernel_y[ky];
                let (a, b, c) = (row[x - 1] as i32, row[x] as i32, row[x + 1] as i32);
                sum_x += a * kx_row[0] + b * kx_row[1] + c * kx_row[2];
                sum_y += a * ky_row[0] + b * ky_row[1] + c * ky_row[2];
            }
            out[x] = magnitude_u8(sum_x, sum_y);
        }
    }
}

/// Write Sobel magnitudes for the interior of `input` into `output`.
///
/// `output` must have the input's dimensions; its border is left as-is.
pub fn sobel_magnitude_into(
    input: ImageU8<'_>,
    output: &mut GrayImageU8,
) -> Result<(), KernelError> {
    check_dims(&input, output)?;
    magnitude_with_kernels(&input, output, &SOBEL_KERNEL_X, &SOBEL_KERNEL_Y);
    Ok(())
}

/// Allocate a zero-filled output and compute Sobel magnitudes into it.
pub fn sobel_magnitude(input: ImageU8<'_>) -> Result<GrayImageU8, KernelError> {
    let mut output = GrayImageU8::zeros(input.w, input.h);
    sobel_magnitude_into(input, &mut output)?;
    Ok(output)
}
