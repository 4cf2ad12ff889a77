//! A small PNG decoder that always hands back RGBA
//!
//! This decodes 8 bit PNG images, sequential or Adam7 interlaced, in any
//! of the five color models the format defines, and normalizes every one
//! of them to four channel RGBA on the way out. Callers never branch on
//! the source layout, a decoded image is always `width * height * 4`
//! bytes.
//!
//! # Features
//! - Sequential and Adam7 interlaced streams
//! - All five color models, expanded to RGBA during decode
//! - Gamma correction when the stream carries a gAMA chunk
//! - Per chunk CRC verification, which can be turned off for speed
//!
//! # Usage
//! Add the library to `Cargo.toml`
//!
//! ```toml
//! texpng = "0.1"
//! ```
//!
//! Then decode:
//!
//! ```no_run
//! use texpng::PngDecoder;
//!
//! let data = std::fs::read("texture.png").unwrap();
//!
//! let mut decoder = PngDecoder::new(&data);
//! let pixels = decoder.decode().unwrap();
//!
//! let (width, height) = decoder.get_dimensions().unwrap();
//!
//! assert_eq!(pixels.len(), width * height * 4);
//! ```
//!
//! # What this decoder is not
//!
//! It is deliberately narrow. Only 8 bit depth is accepted, ancillary
//! chunks other than gAMA are checksummed and skipped, and there is no
//! way to get at the raster in its source layout. Streams outside that
//! envelope are rejected when their header is parsed, before any pixel
//! work happens.
//!
//! # Extracting metadata
//!
//! After a successful decode, image details are accessible via
//! [`get_info()`](PngDecoder::get_info), the stored colorspace via
//! [`get_colorspace()`](PngDecoder::get_colorspace) and the gamma, when
//! one was present, via [`get_gamma()`](PngDecoder::get_gamma).
//!
//! # Alternatives
//! - [png](https://crates.io/crates/png) crate
//!
#![forbid(unsafe_code)]

pub use decoder::{PngDecoder, PngInfo};
pub use enums::{InterlaceMethod, PngColor};
pub use options::PngOptions;
pub use zune_core;

mod constants;
mod crc;
mod decoder;
mod enums;
pub mod error;
mod filters;
mod gamma_correct;
mod headers;
mod options;
mod utils;
