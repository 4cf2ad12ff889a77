/// The eight byte file signature every PNG starts with,
/// stored as one big endian u64 for a single comparison
pub const PNG_SIGNATURE: u64 = 0x8950_4E47_0D0A_1A0A;
