#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // checksums off so the fuzzer reaches past the container into the
    // inflate and unfiltering stages
    let options = texpng::PngOptions::default().set_confirm_crc(false);
    let mut decoder = texpng::PngDecoder::new_with_options(data, options);
    let _ = decoder.decode();
});
