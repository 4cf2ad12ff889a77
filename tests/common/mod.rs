//! Builders for PNG streams assembled byte by byte.
//!
//! Everything here writes the container by hand, checksums included, so
//! the tests control exactly what the decoder sees. Compression uses
//! stored deflate blocks only, which any inflate implementation has to
//! accept and which keep the fixture bytes predictable.
#![allow(dead_code)]

pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Bitwise CRC-32, kept independent of the table driven one inside the
/// library so the two implementations check each other
pub fn crc32(data: &[u8]) -> u32
{
    let mut crc = 0xFFFF_FFFF_u32;

    for byte in data
    {
        crc ^= u32::from(*byte);

        for _ in 0..8
        {
            if crc & 1 == 1
            {
                crc = (crc >> 1) ^ 0xEDB8_8320;
            }
            else
            {
                crc >>= 1;
            }
        }
    }
    !crc
}

pub fn adler32(data: &[u8]) -> u32
{
    let mut s1: u32 = 1;
    let mut s2: u32 = 0;

    for byte in data
    {
        s1 = (s1 + u32::from(*byte)) % 65521;
        s2 = (s2 + s1) % 65521;
    }
    (s2 << 16) | s1
}

/// Wrap raw bytes in a zlib stream of stored blocks, no compression
pub fn zlib_stored(raw: &[u8]) -> Vec<u8>
{
    let mut out = vec![0x78, 0x01];

    if raw.is_empty()
    {
        // a single final block of zero length
        out.extend_from_slice(&[0x01, 0x00, 0x00, 0xFF, 0xFF]);
    }
    else
    {
        let mut blocks = raw.chunks(65535).peekable();

        while let Some(block) = blocks.next()
        {
            let bfinal = u8::from(blocks.peek().is_none());
            let len = block.len() as u16;

            out.push(bfinal);
            out.extend_from_slice(&len.to_le_bytes());
            out.extend_from_slice(&(!len).to_le_bytes());
            out.extend_from_slice(block);
        }
    }
    out.extend_from_slice(&adler32(raw).to_be_bytes());

    out
}

/// Assemble one chunk, length then type then payload then a CRC covering
/// type and payload
pub fn chunk(name: &[u8; 4], payload: &[u8]) -> Vec<u8>
{
    let mut out = Vec::with_capacity(payload.len() + 12);

    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(name);
    out.extend_from_slice(payload);

    let crc = crc32(&out[4..]);

    out.extend_from_slice(&crc.to_be_bytes());

    out
}

pub fn ihdr(width: u32, height: u32, depth: u8, color: u8, interlace: u8) -> Vec<u8>
{
    let mut payload = Vec::with_capacity(13);

    payload.extend_from_slice(&width.to_be_bytes());
    payload.extend_from_slice(&height.to_be_bytes());
    payload.extend_from_slice(&[depth, color, 0, 0, interlace]);

    chunk(b"IHDR", &payload)
}

pub fn plte(entries: &[[u8; 3]]) -> Vec<u8>
{
    let payload: Vec<u8> = entries.iter().flatten().copied().collect();

    chunk(b"PLTE", &payload)
}

pub fn gama(value: u32) -> Vec<u8>
{
    chunk(b"gAMA", &value.to_be_bytes())
}

/// Prefix every scanline of a packed raster with the filter tag zero
pub fn filter_none(pixels: &[u8], width: usize, bpp: usize) -> Vec<u8>
{
    let stride = width * bpp;
    let mut out = Vec::with_capacity(pixels.len() + pixels.len() / stride + 1);

    for row in pixels.chunks(stride)
    {
        out.push(0);
        out.extend_from_slice(row);
    }
    out
}

/// Filter one scanline the way an encoder would.
///
/// `prev` is the reconstructed row above, empty for the first row of an
/// image or interlace pass.
pub fn filter_row(filter: u8, bpp: usize, prev: &[u8], raw: &[u8]) -> Vec<u8>
{
    let mut out = Vec::with_capacity(raw.len() + 1);

    out.push(filter);

    for i in 0..raw.len()
    {
        let a = if i >= bpp { raw[i - bpp] } else { 0 };
        let b = if prev.is_empty() { 0 } else { prev[i] };
        let c = if i >= bpp && !prev.is_empty()
        {
            prev[i - bpp]
        }
        else
        {
            0
        };

        let encoded = match filter
        {
            0 => raw[i],
            1 => raw[i].wrapping_sub(a),
            2 => raw[i].wrapping_sub(b),
            3 => raw[i].wrapping_sub(((u16::from(a) + u16::from(b)) / 2) as u8),
            4 => raw[i].wrapping_sub(paeth(a, b, c)),
            _ => unreachable!()
        };
        out.push(encoded);
    }
    out
}

pub fn paeth(a: u8, b: u8, c: u8) -> u8
{
    let p = i16::from(a) + i16::from(b) - i16::from(c);

    let pa = (p - i16::from(a)).abs();
    let pb = (p - i16::from(b)).abs();
    let pc = (p - i16::from(c)).abs();

    if pa <= pb && pa <= pc
    {
        a
    }
    else if pb <= pc
    {
        b
    }
    else
    {
        c
    }
}

/// Assemble a whole file, signature, IHDR, the extra chunks in order,
/// one IDAT holding `raw` in stored blocks and a closing IEND
pub fn build_png(
    width: u32, height: u32, color: u8, interlace: u8, extra: &[Vec<u8>], raw: &[u8]
) -> Vec<u8>
{
    let mut png = SIGNATURE.to_vec();

    png.extend_from_slice(&ihdr(width, height, 8, color, interlace));

    for item in extra
    {
        png.extend_from_slice(item);
    }

    png.extend_from_slice(&chunk(b"IDAT", &zlib_stored(raw)));
    png.extend_from_slice(&chunk(b"IEND", &[]));

    png
}
