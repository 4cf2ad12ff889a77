use std::collections::TryReserveError;
use std::fmt::{Debug, Formatter};

use miniz_oxide::inflate::TINFLStatus;

/// All the ways a decode can fail
pub enum PngDecodeErrors
{
    BadSignature,
    BadHeader(&'static str),
    BadCrc(u32, u32),
    BadFilter(u8),
    UnsupportedColor(u8),
    EmptyPalette,
    Truncated(&'static str),
    InflateError(TINFLStatus),
    TooSmallOutput(usize, usize),
    OutOfMemory(TryReserveError),
    GenericStatic(&'static str),
    Generic(String)
}

impl Debug for PngDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::BadSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::BadHeader(reason) => writeln!(f, "Malformed IHDR: {reason}"),
            Self::BadCrc(expected, found) => writeln!(
                f,
                "CRC does not match, expected {expected} but found {found}"
            ),
            Self::BadFilter(tag) => writeln!(f, "Unknown filter tag {tag}, corrupt scanline"),
            Self::UnsupportedColor(tag) => writeln!(f, "Unsupported color model tag {tag}"),
            Self::EmptyPalette => writeln!(f, "Empty palette but image is indexed"),
            Self::Truncated(reason) => writeln!(f, "Stream ended too early: {reason:?}"),
            Self::InflateError(status) =>
            {
                writeln!(f, "Error inflating idat chunks: {status:?}")
            }
            Self::TooSmallOutput(expected, found) =>
            {
                writeln!(f, "Too small inflate output, expected stream with at least {expected} bytes but got one with {found} bytes")
            }
            Self::OutOfMemory(err) => writeln!(f, "Could not allocate: {err}"),
            Self::GenericStatic(val) => writeln!(f, "{val:?}"),
            Self::Generic(val) => writeln!(f, "{val:?}")
        }
    }
}

impl From<&'static str> for PngDecodeErrors
{
    fn from(val: &'static str) -> Self
    {
        Self::Truncated(val)
    }
}

impl From<String> for PngDecodeErrors
{
    fn from(val: String) -> Self
    {
        Self::Generic(val)
    }
}

impl From<TryReserveError> for PngDecodeErrors
{
    fn from(val: TryReserveError) -> Self
    {
        Self::OutOfMemory(val)
    }
}
