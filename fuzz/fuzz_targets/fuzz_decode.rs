#![no_main]
use libfuzzer_sys::fuzz_target;
use propack::{DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };

    // Try each container explicitly — must never panic
    let _ = DecodeRequest::propra(data).with_limits(&limits).decode();
    let _ = DecodeRequest::tga(data).with_limits(&limits).decode();
});
