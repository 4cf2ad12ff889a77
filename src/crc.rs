//! CRC-32 as PNG uses it, covering each chunk's type tag and payload.
//!
//! This is the reflected 0xEDB88320 polynomial driven through a 256 entry
//! byte table. The table is built on first use and then shared for the
//! lifetime of the process.

use std::sync::OnceLock;

/// Reversed representation of the PNG CRC polynomial
const CRC_POLYNOMIAL: u32 = 0xEDB8_8320;

static CRC_TABLE: OnceLock<[u32; 256]> = OnceLock::new();

fn crc_table() -> &'static [u32; 256]
{
    CRC_TABLE.get_or_init(|| {
        let mut table = [0_u32; 256];

        for (byte, entry) in table.iter_mut().enumerate()
        {
            let mut rem = byte as u32;

            for _ in 0..8
            {
                if rem & 1 == 1
                {
                    rem = (rem >> 1) ^ CRC_POLYNOMIAL;
                }
                else
                {
                    rem >>= 1;
                }
            }
            *entry = rem;
        }
        table
    })
}

/// Update a running CRC with the bytes in `data`.
///
/// Pass 0 to start a fresh computation. The complement dance on entry and
/// exit makes calls chainable, the return value of one call is a valid
/// `crc` argument for the next.
pub(crate) fn crc32(crc: u32, data: &[u8]) -> u32
{
    let table = crc_table();

    let mut c = !crc;

    for byte in data
    {
        c = (c >> 8) ^ table[((c ^ u32::from(*byte)) & 0xFF) as usize];
    }
    !c
}
