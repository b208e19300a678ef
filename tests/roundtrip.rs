use std::io::Cursor;

use propack::*;

/// Deterministic test image with runs, literals, and a spread of byte values.
fn patterned_image(width: u16, height: u16) -> Image {
    let mut pixels = Vec::with_capacity(usize::from(width) * usize::from(height));
    for y in 0..height {
        for x in 0..width {
            let px = if (x / 5) % 2 == 0 {
                // flat stretch, friendly to RLE
                Pixel::new(10, 20, 30)
            } else {
                Pixel::new(
                    (x % 251) as u8,
                    (y % 241) as u8,
                    ((x ^ y) % 239) as u8,
                )
            };
            pixels.push(px);
        }
    }
    Image::new(width, height, pixels).unwrap()
}

fn encode_to_vec(request: &EncodeRequest, image: &Image) -> (Vec<u8>, EncodeStats) {
    let mut out = Cursor::new(Vec::new());
    let stats = request.encode(image, &mut out).unwrap();
    (out.into_inner(), stats)
}

#[test]
fn propra_roundtrip_uncompressed() {
    let image = patterned_image(37, 11);
    let (bytes, stats) = encode_to_vec(&EncodeRequest::propra(Compression::Uncompressed), &image);
    assert_eq!(stats.data_segment_size, 37 * 11 * 3);

    let decoded = DecodeRequest::propra(&bytes[..]).decode().unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn propra_roundtrip_rle() {
    let image = patterned_image(64, 9);
    let (bytes, _) = encode_to_vec(&EncodeRequest::propra(Compression::Rle), &image);

    let decoded = DecodeRequest::propra(&bytes[..]).decode().unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn propra_roundtrip_huffman() {
    let image = patterned_image(33, 17);
    let (bytes, _) = encode_to_vec(&EncodeRequest::propra(Compression::Huffman), &image);

    let decoded = DecodeRequest::propra(&bytes[..]).decode().unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn propra_huffman_single_color_image() {
    // A single distinct byte value still yields a decodable two-leaf tree.
    let image = Image::new(16, 16, vec![Pixel::new(7, 7, 7); 256]).unwrap();
    let (bytes, _) = encode_to_vec(&EncodeRequest::propra(Compression::Huffman), &image);

    let decoded = DecodeRequest::propra(&bytes[..]).decode().unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn propra_huffman_single_color_0xff() {
    // The synthetic sibling symbol wraps 255 -> 0; pinned behavior.
    let image = Image::new(8, 8, vec![Pixel::new(0xFF, 0xFF, 0xFF); 64]).unwrap();
    let (bytes, _) = encode_to_vec(&EncodeRequest::propra(Compression::Huffman), &image);

    let decoded = DecodeRequest::propra(&bytes[..]).decode().unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn propra_header_carries_patched_values() {
    for compression in [Compression::Uncompressed, Compression::Rle, Compression::Huffman] {
        let image = patterned_image(41, 13);
        let (bytes, stats) = encode_to_vec(&EncodeRequest::propra(compression), &image);

        let declared_size = u64::from_le_bytes(bytes[0x10..0x18].try_into().unwrap());
        let declared_checksum = u32::from_le_bytes(bytes[0x18..0x1C].try_into().unwrap());
        assert_eq!(declared_size, stats.data_segment_size);
        assert_eq!(declared_checksum, stats.checksum);
        assert_eq!(bytes.len() as u64, 28 + stats.data_segment_size);

        // decode recomputes both and fails on any difference
        DecodeRequest::propra(&bytes[..]).decode().unwrap();
    }
}

#[test]
fn tga_roundtrip_uncompressed() {
    let image = patterned_image(21, 7);
    let (bytes, stats) = encode_to_vec(&EncodeRequest::tga(Compression::Uncompressed), &image);
    assert_eq!(stats.data_segment_size, 21 * 7 * 3);
    assert_eq!(bytes[2], 2);

    let decoded = DecodeRequest::tga(&bytes[..]).decode().unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn tga_roundtrip_rle() {
    let image = patterned_image(50, 6);
    let (bytes, _) = encode_to_vec(&EncodeRequest::tga(Compression::Rle), &image);
    assert_eq!(bytes[2], 10);

    let decoded = DecodeRequest::tga(&bytes[..]).decode().unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn tga_to_propra_to_tga() {
    let image = patterned_image(30, 30);
    let (tga_bytes, _) = encode_to_vec(&EncodeRequest::tga(Compression::Rle), &image);

    let from_tga = DecodeRequest::tga(&tga_bytes[..]).decode().unwrap();
    let (propra_bytes, _) = encode_to_vec(&EncodeRequest::propra(Compression::Huffman), &from_tga);

    let from_propra = DecodeRequest::propra(&propra_bytes[..]).decode().unwrap();
    let (back, _) = encode_to_vec(&EncodeRequest::tga(Compression::Uncompressed), &from_propra);

    let final_image = DecodeRequest::tga(&back[..]).decode().unwrap();
    assert_eq!(final_image, image);
}

#[test]
fn single_pixel_image_round_trips_everywhere() {
    let image = Image::new(1, 1, vec![Pixel::new(1, 2, 3)]).unwrap();
    for request in [
        EncodeRequest::propra(Compression::Uncompressed),
        EncodeRequest::propra(Compression::Rle),
        EncodeRequest::propra(Compression::Huffman),
        EncodeRequest::tga(Compression::Uncompressed),
        EncodeRequest::tga(Compression::Rle),
    ] {
        let (bytes, _) = encode_to_vec(&request, &image);
        let decoded = if bytes.starts_with(b"ProPraWS19") {
            DecodeRequest::propra(&bytes[..]).decode().unwrap()
        } else {
            DecodeRequest::tga(&bytes[..]).decode().unwrap()
        };
        assert_eq!(decoded, image);
    }
}

#[test]
fn compression_pick_is_consistent() {
    // runs compress; noise does not
    let flat = Image::new(100, 10, vec![Pixel::new(5, 5, 5); 1000]).unwrap();
    assert_eq!(Compression::pick(&flat), Compression::Rle);

    let noisy_pixels: Vec<Pixel> = (0..1000u32)
        .map(|i| Pixel::new((i % 255) as u8, (i % 253) as u8, (i % 251) as u8))
        .collect();
    let noisy = Image::new(100, 10, noisy_pixels).unwrap();
    assert_eq!(Compression::pick(&noisy), Compression::Uncompressed);

    for image in [flat, noisy] {
        let picked = Compression::pick(&image);
        let (picked_bytes, _) = encode_to_vec(&EncodeRequest::propra(picked), &image);
        let other = match picked {
            Compression::Rle => Compression::Uncompressed,
            _ => Compression::Rle,
        };
        let (other_bytes, _) = encode_to_vec(&EncodeRequest::propra(other), &image);
        assert!(picked_bytes.len() <= other_bytes.len());
    }
}
