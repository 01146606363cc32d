pub mod io;
pub mod shape;
pub mod traits;
pub mod u8;

pub use self::shape::GridShape;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::{GrayImageU8, ImageU8};
