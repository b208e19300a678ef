#![no_main]
use libfuzzer_sys::fuzz_target;
use propack::{Compression, DecodeRequest, EncodeRequest, Limits};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };

    // If it decodes as ProPra, re-encoding in every mode must round-trip.
    let Ok(decoded) = DecodeRequest::propra(data).with_limits(&limits).decode() else {
        return;
    };

    for compression in [Compression::Uncompressed, Compression::Rle, Compression::Huffman] {
        let mut out = Cursor::new(Vec::new());
        EncodeRequest::propra(compression)
            .encode(&decoded, &mut out)
            .expect("encoding a decoded image must succeed");
        let bytes = out.into_inner();
        let decoded2 = DecodeRequest::propra(&bytes[..])
            .decode()
            .expect("re-encoded data failed to decode");
        assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
    }
});
