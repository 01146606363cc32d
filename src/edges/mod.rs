//! Edge processing: the fixed 3×3 Sobel gradient-magnitude operator.
//!
//! The operator reads a grayscale grid and writes `round(sqrt(gx² + gy²))`,
//! clamped to 255, into every interior pixel of an output grid of the same
//! size. Border pixels are never written, so whatever the caller seeded the
//! output with survives the call. The row-block pipeline relies on this: a
//! block without halo rows leaves its first and last row untouched.

pub mod grad;

pub use grad::{
    sobel_magnitude, sobel_magnitude_into, Kernel3, SOBEL_KERNEL_X, SOBEL_KERNEL_Y,
};
