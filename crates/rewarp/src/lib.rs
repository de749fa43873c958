#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use rewarp_algebra as algebra;

#[doc(inline)]
pub use rewarp_image as image;

#[doc(inline)]
pub use rewarp_imgproc as imgproc;
