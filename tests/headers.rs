use std::io::Cursor;

use assert_matches::assert_matches;
use propack::*;

fn small_image() -> Image {
    let pixels = (0..12u8).map(|i| Pixel::new(i, i + 1, i + 2)).collect();
    Image::new(4, 3, pixels).unwrap()
}

fn encode_propra(compression: Compression, image: &Image) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    EncodeRequest::propra(compression).encode(image, &mut out).unwrap();
    out.into_inner()
}

#[test]
fn propra_rejects_bad_magic() {
    let mut bytes = encode_propra(Compression::Uncompressed, &small_image());
    bytes[0] = b'X';
    assert_matches!(
        DecodeRequest::propra(&bytes[..]).decode(),
        Err(CodecError::UnrecognizedFormat)
    );
}

#[test]
fn propra_rejects_zero_width() {
    let mut bytes = encode_propra(Compression::Uncompressed, &small_image());
    bytes[0x0A] = 0;
    bytes[0x0B] = 0;
    assert_matches!(
        DecodeRequest::propra(&bytes[..]).decode(),
        Err(CodecError::InvalidHeader(_))
    );
}

#[test]
fn propra_rejects_wrong_pixel_depth() {
    let mut bytes = encode_propra(Compression::Uncompressed, &small_image());
    bytes[0x0E] = 32;
    assert_matches!(
        DecodeRequest::propra(&bytes[..]).decode(),
        Err(CodecError::UnsupportedVariant(_))
    );
}

#[test]
fn propra_rejects_unknown_compression_code() {
    let mut bytes = encode_propra(Compression::Uncompressed, &small_image());
    bytes[0x0F] = 7;
    assert_matches!(
        DecodeRequest::propra(&bytes[..]).decode(),
        Err(CodecError::InvalidHeader(_))
    );
}

#[test]
fn propra_rejects_truncated_header() {
    let bytes = encode_propra(Compression::Uncompressed, &small_image());
    assert_matches!(
        DecodeRequest::propra(&bytes[..20]).decode(),
        Err(CodecError::UnexpectedEof)
    );
}

#[test]
fn propra_rejects_truncated_body() {
    let bytes = encode_propra(Compression::Uncompressed, &small_image());
    assert_matches!(
        DecodeRequest::propra(&bytes[..bytes.len() - 5]).decode(),
        Err(CodecError::UnexpectedEof)
    );
}

#[test]
fn propra_rejects_corrupted_checksum() {
    let mut bytes = encode_propra(Compression::Rle, &small_image());
    bytes[0x18] ^= 0xFF;
    assert_matches!(
        DecodeRequest::propra(&bytes[..]).decode(),
        Err(CodecError::ChecksumMismatch { .. })
    );
}

#[test]
fn propra_rejects_corrupted_size_field() {
    let mut bytes = encode_propra(Compression::Rle, &small_image());
    bytes[0x10] ^= 0x01;
    assert_matches!(
        DecodeRequest::propra(&bytes[..]).decode(),
        Err(CodecError::SizeMismatch { .. })
    );
}

#[test]
fn propra_mismatch_errors_carry_both_values() {
    let mut bytes = encode_propra(Compression::Uncompressed, &small_image());
    let declared_before = u32::from_le_bytes(bytes[0x18..0x1C].try_into().unwrap());
    bytes[0x18] = bytes[0x18].wrapping_add(1);
    let tampered = u32::from_le_bytes(bytes[0x18..0x1C].try_into().unwrap());
    match DecodeRequest::propra(&bytes[..]).decode() {
        Err(CodecError::ChecksumMismatch { declared, computed }) => {
            assert_eq!(computed, declared_before);
            assert_eq!(declared, tampered);
            assert_ne!(declared, computed);
        }
        other => panic!("expected ChecksumMismatch, got {other:?}"),
    }
}

#[test]
fn propra_rejects_trailing_data() {
    let mut bytes = encode_propra(Compression::Uncompressed, &small_image());
    bytes.push(0x00);
    assert_matches!(
        DecodeRequest::propra(&bytes[..]).decode(),
        Err(CodecError::TrailingData)
    );
}

#[test]
fn propra_reports_incomplete_huffman_tree() {
    let mut bytes = encode_propra(Compression::Huffman, &small_image());
    // keep the header but cut the segment inside the serialized tree
    bytes.truncate(29);
    assert_matches!(
        DecodeRequest::propra(&bytes[..]).decode(),
        Err(CodecError::TreeIncomplete)
    );
}

#[test]
fn propra_limits_reject_large() {
    let bytes = encode_propra(Compression::Uncompressed, &small_image());
    let limits = Limits {
        max_pixels: Some(4),
        ..Default::default()
    };
    assert_matches!(
        DecodeRequest::propra(&bytes[..]).with_limits(&limits).decode(),
        Err(CodecError::LimitExceeded(_))
    );
}

#[test]
fn tga_tolerates_trailing_data() {
    let image = small_image();
    let mut out = Cursor::new(Vec::new());
    EncodeRequest::tga(Compression::Uncompressed).encode(&image, &mut out).unwrap();
    let mut bytes = out.into_inner();
    bytes.extend_from_slice(b"TRUEVISION-XFILE.\0");

    let decoded = DecodeRequest::tga(&bytes[..]).decode().unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn tga_rejects_huffman_output() {
    let image = small_image();
    let mut out = Cursor::new(Vec::new());
    assert_matches!(
        EncodeRequest::tga(Compression::Huffman).encode(&image, &mut out),
        Err(CodecError::UnsupportedVariant(_))
    );
}

#[test]
fn tga_rejects_unknown_image_type() {
    let image = small_image();
    let mut out = Cursor::new(Vec::new());
    EncodeRequest::tga(Compression::Uncompressed).encode(&image, &mut out).unwrap();
    let mut bytes = out.into_inner();
    bytes[2] = 1; // color-mapped
    assert_matches!(
        DecodeRequest::tga(&bytes[..]).decode(),
        Err(CodecError::UnsupportedVariant(_))
    );
}

#[test]
fn tga_rejects_bottom_left_origin() {
    let image = small_image();
    let mut out = Cursor::new(Vec::new());
    EncodeRequest::tga(Compression::Uncompressed).encode(&image, &mut out).unwrap();
    let mut bytes = out.into_inner();
    bytes[0x11] = 0x00; // descriptor: bottom-left
    assert_matches!(
        DecodeRequest::tga(&bytes[..]).decode(),
        Err(CodecError::InvalidHeader(_))
    );
}

#[test]
fn tga_rejects_truncated_rle_stream() {
    let image = small_image();
    let mut out = Cursor::new(Vec::new());
    EncodeRequest::tga(Compression::Rle).encode(&image, &mut out).unwrap();
    let bytes = out.into_inner();
    assert_matches!(
        DecodeRequest::tga(&bytes[..bytes.len() - 2]).decode(),
        Err(CodecError::UnexpectedEof)
    );
}
