#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! A crate for decoding PNG data into RGBA pixels.
//!
//! Only the narrow slice of PNG that shows up in simple truecolor images is
//! supported: 8 bits per channel RGB, not interlaced, with `IHDR`, `IDAT`,
//! `tEXt`, and `IEND` chunks. Any other chunk type is an error rather than
//! something to skip past.
//!
//! ```no_run
//! # #[cfg(feature = "miniz_oxide")]
//! # fn main() -> Result<(), pngview::PngError> {
//! let bytes: &[u8] = unimplemented!("data from somewhere");
//! let image = pngview::PixelBuffer::try_from_png_bytes(bytes)?;
//! println!("{}x{}", image.width(), image.height());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "miniz_oxide"))]
//! # fn main() {}
//! ```

extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod image;
pub use image::*;

pub mod png;
