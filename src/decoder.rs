use log::trace;
use zune_core::bit_depth::BitDepth;
use zune_core::bytestream::ZByteReader;
use zune_core::colorspace::ColorSpace;

use crate::constants::PNG_SIGNATURE;
use crate::crc::crc32;
use crate::enums::{FilterMethod, InterlaceMethod, PngChunkType, PngColor};
use crate::error::PngDecodeErrors;
use crate::filters::{
    handle_avg, handle_avg_first, handle_paeth, handle_paeth_first, handle_sub, handle_up
};
use crate::gamma_correct::gamma_correct;
use crate::options::PngOptions;
use crate::utils::{expand_luma, expand_luma_alpha, expand_palette, expand_rgb};

/// A single palette entry.
///
/// PLTE carries red, green and blue only, alpha defaults to opaque.
#[derive(Copy, Clone)]
pub(crate) struct PLTEEntry
{
    pub red:   u8,
    pub green: u8,
    pub blue:  u8,
    pub alpha: u8
}

impl Default for PLTEEntry
{
    fn default() -> Self
    {
        PLTEEntry {
            red:   0,
            green: 0,
            blue:  0,
            alpha: 255
        }
    }
}

#[derive(Copy, Clone)]
pub(crate) struct PngChunk
{
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub chunk:      [u8; 4]
}

/// Image details pulled out of the header chunk
#[derive(Default, Debug, Copy, Clone)]
pub struct PngInfo
{
    pub width:            usize,
    pub height:           usize,
    pub depth:            u8,
    pub color:            PngColor,
    pub component:        u8,
    pub interlace_method: InterlaceMethod
}

/// A PNG decoder fixed on 8 bit inputs and RGBA output
pub struct PngDecoder<'a>
{
    pub(crate) seen_hdr:    bool,
    pub(crate) seen_plte:   bool,
    pub(crate) seen_gamma:  bool,
    pub(crate) stream:      ZByteReader<'a>,
    pub(crate) options:     PngOptions,
    pub(crate) png_info:    PngInfo,
    pub(crate) palette:     Vec<PLTEEntry>,
    pub(crate) idat_chunks: Vec<u8>,
    pub(crate) out:         Vec<u8>,
    pub(crate) gama:        f32
}

impl<'a> PngDecoder<'a>
{
    pub fn new(data: &'a [u8]) -> PngDecoder<'a>
    {
        let default_opt = PngOptions::default();

        PngDecoder::new_with_options(data, default_opt)
    }

    pub fn new_with_options(data: &'a [u8], options: PngOptions) -> PngDecoder<'a>
    {
        PngDecoder {
            seen_hdr: false,
            seen_plte: false,
            seen_gamma: false,
            stream: ZByteReader::new(data),
            options,
            png_info: PngInfo::default(),
            palette: Vec::new(),
            idat_chunks: Vec::new(),
            out: Vec::new(),
            gama: 0.0
        }
    }

    /// Image width and height, available once the header has been parsed
    pub const fn get_dimensions(&self) -> Option<(usize, usize)>
    {
        if !self.seen_hdr
        {
            return None;
        }

        Some((self.png_info.width, self.png_info.height))
    }

    pub const fn get_depth(&self) -> Option<BitDepth>
    {
        if !self.seen_hdr
        {
            return None;
        }
        // only one depth survives header validation
        Some(BitDepth::Eight)
    }

    /// The colorspace the file stores its pixels in.
    ///
    /// This reports what the stream carries, decoding itself always
    /// hands back RGBA.
    pub fn get_colorspace(&self) -> Option<ColorSpace>
    {
        if !self.seen_hdr
        {
            return None;
        }
        match self.png_info.color
        {
            PngColor::Palette => Some(ColorSpace::RGB),
            PngColor::Luma => Some(ColorSpace::Luma),
            PngColor::LumaA => Some(ColorSpace::LumaA),
            PngColor::RGB => Some(ColorSpace::RGB),
            PngColor::RGBA => Some(ColorSpace::RGBA),
            PngColor::Unknown => unreachable!()
        }
    }

    pub const fn get_info(&self) -> Option<&PngInfo>
    {
        if !self.seen_hdr
        {
            return None;
        }
        Some(&self.png_info)
    }

    /// Gamma stored in the gAMA chunk, if one was present
    pub const fn get_gamma(&self) -> Option<f32>
    {
        if !self.seen_gamma
        {
            return None;
        }
        Some(self.gama)
    }

    fn read_chunk_header(&mut self) -> Result<PngChunk, PngDecodeErrors>
    {
        // chunk layout is length - type - [payload] - crc, with the crc
        // covering type and payload
        let chunk_length = self.stream.get_u32_be_err()? as usize;
        let chunk_type_int = self.stream.get_u32_be_err()?.to_be_bytes();

        if !self.stream.has(chunk_length.saturating_add(4) /*crc*/)
        {
            return Err(PngDecodeErrors::Truncated(
                "Chunk payload and CRC extend past the end of the stream"
            ));
        }

        let chunk_type = match &chunk_type_int
        {
            b"IHDR" => PngChunkType::IHDR,
            b"PLTE" => PngChunkType::PLTE,
            b"IDAT" => PngChunkType::IDAT,
            b"IEND" => PngChunkType::IEND,
            b"gAMA" => PngChunkType::gAMA,

            _ => PngChunkType::unkn
        };

        if self.options.get_confirm_crc()
        {
            let mut crc_bytes = [0; 4];

            // the stored checksum sits right after the payload
            crc_bytes.copy_from_slice(self.stream.peek_at(chunk_length, 4)?);

            let expected = u32::from_be_bytes(crc_bytes);

            // go back and point to the chunk type, the checksum covers
            // it together with the payload
            self.stream.rewind(4);

            let bytes = self.stream.peek_at(0, chunk_length + 4)?;

            let calculated = crc32(0, bytes);

            if expected != calculated
            {
                return Err(PngDecodeErrors::BadCrc(expected, calculated));
            }
            // put the cursor back on the first payload byte, the chunk
            // parsers expect to start there
            self.stream.skip(4);
        }

        Ok(PngChunk {
            length: chunk_length,
            chunk: chunk_type_int,
            chunk_type
        })
    }

    /// Decode a PNG stream, returning the raster as RGBA bytes.
    ///
    /// The output is always `width * height * 4` bytes no matter which
    /// color model the file stores. Grayscale and palette images are
    /// expanded and opaque alpha is filled in where the source has none.
    pub fn decode(&mut self) -> Result<Vec<u8>, PngDecodeErrors>
    {
        let signature = self.stream.get_u64_be_err()?;

        if signature != PNG_SIGNATURE
        {
            return Err(PngDecodeErrors::BadSignature);
        }

        // peek the first chunk type before entering the loop, a stray
        // leading chunk should fail before anything is parsed
        if self.stream.peek_at(4, 4)? != b"IHDR"
        {
            return Err(PngDecodeErrors::GenericStatic(
                "First chunk not IHDR, corrupt PNG"
            ));
        }

        loop
        {
            let header = self.read_chunk_header()?;

            match header.chunk_type
            {
                PngChunkType::IHDR =>
                {
                    self.parse_ihdr(header)?;
                }
                PngChunkType::PLTE =>
                {
                    self.parse_plte(header)?;
                }
                PngChunkType::IDAT =>
                {
                    self.parse_idat(header)?;
                }
                PngChunkType::gAMA =>
                {
                    self.parse_gama(header)?;
                }
                PngChunkType::IEND =>
                {
                    break;
                }
                PngChunkType::unkn =>
                {
                    let chunk_name = core::str::from_utf8(&header.chunk).unwrap_or("XXXX");

                    trace!("Skipping unknown chunk {:?}, {} bytes", chunk_name, header.length);

                    self.stream.skip(header.length + 4);
                }
            }
        }

        if self.idat_chunks.is_empty()
        {
            return Err(PngDecodeErrors::GenericStatic(
                "No IDAT data present, nothing to decode"
            ));
        }

        let deflate_data = self.inflate()?;
        // the compressed copies are dead weight from here on
        self.idat_chunks = Vec::new();

        let info = self.png_info;
        let bpp = usize::from(info.color.num_components());

        // everything sized off the raster funnels through this product,
        // guard it once
        let rgba_len = info
            .width
            .checked_mul(info.height)
            .and_then(|size| size.checked_mul(4))
            .ok_or(PngDecodeErrors::GenericStatic("Image dimensions overflow"))?;

        if info.interlace_method == InterlaceMethod::Standard
        {
            self.create_png_image_raw(&deflate_data, info.width, info.height)?;
        }
        else
        {
            // Adam7.
            //
            // Seven passes, each an independently filtered sub image
            // whose pixels land in the final raster on a fixed grid.
            const XORIG: [usize; 7] = [0, 4, 0, 2, 0, 1, 0];
            const YORIG: [usize; 7] = [0, 0, 4, 0, 2, 0, 1];

            const XSPC: [usize; 7] = [8, 8, 4, 4, 2, 2, 1];
            const YSPC: [usize; 7] = [8, 8, 8, 4, 4, 2, 2];

            let mut final_out = try_alloc_zeroed(info.width * info.height * bpp)?;

            let mut image_offset = 0;

            for p in 0..7
            {
                // grid positions that land inside the image, passes that
                // miss it entirely contribute no bytes to the stream
                let x = (info.width.saturating_sub(XORIG[p]) + XSPC[p] - 1) / XSPC[p];
                let y = (info.height.saturating_sub(YORIG[p]) + YSPC[p] - 1) / YSPC[p];

                if x != 0 && y != 0
                {
                    let image_len = (x * bpp + 1)
                        .checked_mul(y)
                        .ok_or(PngDecodeErrors::GenericStatic("Image dimensions overflow"))?;

                    let pass_data = deflate_data
                        .get(image_offset..image_offset + image_len)
                        .ok_or(PngDecodeErrors::TooSmallOutput(
                            image_offset + image_len,
                            deflate_data.len()
                        ))?;

                    self.create_png_image_raw(pass_data, x, y)?;

                    for j in 0..y
                    {
                        for i in 0..x
                        {
                            let out_y = j * YSPC[p] + YORIG[p];
                            let out_x = i * XSPC[p] + XORIG[p];

                            let final_start = (out_y * info.width + out_x) * bpp;
                            let out_start = (j * x + i) * bpp;

                            final_out[final_start..final_start + bpp]
                                .copy_from_slice(&self.out[out_start..out_start + bpp]);
                        }
                    }
                    image_offset += image_len;
                }
            }
            self.out = final_out;
        }

        let mut out = self.expand_to_rgba(rgba_len)?;

        if self.gama > 0.0
        {
            gamma_correct(&mut out, self.gama);
        }

        Ok(out)
    }

    /// Undo filtering on one run of decompressed scanlines, writing the
    /// reconstructed rows to `self.out`.
    ///
    /// Called once for sequential images and once per pass for
    /// interlaced ones, every call starts with fresh filter context.
    fn create_png_image_raw(
        &mut self, deflate_data: &[u8], width: usize, height: usize
    ) -> Result<(), PngDecodeErrors>
    {
        let components = usize::from(self.png_info.color.num_components());

        // a filter tag byte, then width * components image bytes
        let chunk_size = width * components + 1;
        let image_len = chunk_size
            .checked_mul(height)
            .ok_or(PngDecodeErrors::GenericStatic("Image dimensions overflow"))?;

        if deflate_data.len() < image_len
        {
            return Err(PngDecodeErrors::TooSmallOutput(
                image_len,
                deflate_data.len()
            ));
        }

        self.out = try_alloc_zeroed(image_len)?;

        let out = &mut self.out;

        let width_stride = chunk_size - 1;

        let mut prev_row_start = 0;
        let mut out_position = 0;
        let mut first_row = true;

        //
        // ┌─────┬─────┐
        // │ c   │  b  │
        // ├─────┼─────┤
        // │ a   │ x   │
        // └─────┴─────┘
        //
        for in_stride in deflate_data.chunks_exact(chunk_size).take(height)
        {
            // split the output into rows already reconstructed and the
            // row being written, filters read from the former
            let (prev, current) = out.split_at_mut(out_position);

            let mut prev_row: &[u8] = &[];

            if !first_row
            {
                prev_row = &prev[prev_row_start..prev_row_start + width_stride];
                prev_row_start += width_stride;
            }

            out_position += width_stride;

            let filter_byte = in_stride[0];
            // raw image bytes for this scanline
            let raw = &in_stride[1..];

            let mut filter =
                FilterMethod::from_int(filter_byte).ok_or(PngDecodeErrors::BadFilter(filter_byte))?;

            if first_row
            {
                // the first row has no predecessor, swap in the variants
                // that treat the row above as zeroes
                filter = match filter
                {
                    FilterMethod::Paeth => FilterMethod::PaethFirst,
                    FilterMethod::Average => FilterMethod::AvgFirst,
                    // up against a zero row is a straight copy
                    FilterMethod::Up => FilterMethod::None,
                    other => other
                };

                first_row = false;
            }

            match filter
            {
                FilterMethod::None => current[0..width_stride].copy_from_slice(raw),

                FilterMethod::Sub => handle_sub(raw, current, components),

                FilterMethod::Up => handle_up(prev_row, raw, current),

                FilterMethod::Average => handle_avg(prev_row, raw, current, components),

                FilterMethod::Paeth => handle_paeth(prev_row, raw, current, components),

                FilterMethod::PaethFirst => handle_paeth_first(raw, current, components),

                FilterMethod::AvgFirst => handle_avg_first(raw, current, components),

                FilterMethod::Unknown => unreachable!()
            }
        }

        Ok(())
    }

    /// Normalize the reconstructed raster to RGBA
    fn expand_to_rgba(&mut self, rgba_len: usize) -> Result<Vec<u8>, PngDecodeErrors>
    {
        if self.png_info.color == PngColor::RGBA
        {
            // already the output layout, just drop the row slack
            self.out.truncate(rgba_len);
            return Ok(std::mem::take(&mut self.out));
        }

        let mut rgba = try_alloc_zeroed(rgba_len)?;

        match self.png_info.color
        {
            PngColor::Luma => expand_luma(&self.out, &mut rgba),
            PngColor::LumaA => expand_luma_alpha(&self.out, &mut rgba),
            PngColor::RGB => expand_rgb(&self.out, &mut rgba),
            PngColor::Palette =>
            {
                if self.palette.is_empty()
                {
                    return Err(PngDecodeErrors::EmptyPalette);
                }
                expand_palette(&self.out, &mut rgba, &self.palette);
            }
            PngColor::RGBA | PngColor::Unknown => unreachable!()
        }

        self.out = Vec::new();

        Ok(rgba)
    }

    /// Inflate the accumulated IDAT bytes.
    ///
    /// Deflate doesn't record its decompressed size anywhere, so the
    /// output buffer starts at a small multiple of the compressed size
    /// and doubles whenever the decompressor reports it ran out of room,
    /// resuming where it stopped until the stream signals completion.
    fn inflate(&mut self) -> Result<Vec<u8>, PngDecodeErrors>
    {
        use miniz_oxide::inflate::core::inflate_flags::{
            TINFL_FLAG_PARSE_ZLIB_HEADER, TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF
        };
        use miniz_oxide::inflate::core::{decompress, DecompressorOxide};
        use miniz_oxide::inflate::TINFLStatus;

        const FLAGS: u32 = TINFL_FLAG_PARSE_ZLIB_HEADER | TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF;

        let mut out = Vec::new();

        out.try_reserve_exact(self.idat_chunks.len() * 4)?;
        out.resize(self.idat_chunks.len() * 4, 0);

        let mut decompressor = DecompressorOxide::new();

        let mut in_position = 0;
        let mut out_position = 0;

        loop
        {
            let (status, bytes_in, bytes_out) = decompress(
                &mut decompressor,
                &self.idat_chunks[in_position..],
                &mut out,
                out_position,
                FLAGS
            );

            in_position += bytes_in;
            out_position += bytes_out;

            match status
            {
                TINFLStatus::Done =>
                {
                    out.truncate(out_position);

                    trace!("Inflate size: {} bytes", out_position);

                    return Ok(out);
                }
                TINFLStatus::HasMoreOutput =>
                {
                    // out of room, double and resume
                    let additional = out.len();

                    out.try_reserve_exact(additional)?;
                    out.resize(additional * 2, 0);
                }
                // everything else, including input running dry, is a
                // corrupt stream
                _ => return Err(PngDecodeErrors::InflateError(status))
            }
        }
    }
}

/// Allocate a zeroed buffer, reporting allocation failure as an error
fn try_alloc_zeroed(len: usize) -> Result<Vec<u8>, PngDecodeErrors>
{
    let mut buf = Vec::new();

    buf.try_reserve_exact(len)?;
    buf.resize(len, 0);

    Ok(buf)
}
