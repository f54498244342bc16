use super::*;

fn encode_png(img: image::DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

#[test]
fn decodes_rgba_png() {
    let img = image::RgbaImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    let (dims, px) = decode_rgba8(&encode_png(image::DynamicImage::ImageRgba8(img))).unwrap();
    assert_eq!(dims, GridDims::new(2, 1).unwrap());
    assert_eq!(px, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn decodes_gray_mask_to_unit_range() {
    let img = image::GrayImage::from_raw(3, 1, vec![0, 51, 255]).unwrap();
    let (dims, mask) = decode_mask(&encode_png(image::DynamicImage::ImageLuma8(img))).unwrap();
    assert_eq!(dims, GridDims::new(3, 1).unwrap());
    assert_eq!(mask, vec![0.0, 0.2, 1.0]);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_rgba8(b"not an image").is_err());
    assert!(decode_mask(b"not an image").is_err());
}

#[test]
fn mask_quantization_clamps() {
    assert_eq!(mask_to_luma8(&[-1.0, 0.0, 0.5, 1.0, 2.0]), vec![0, 0, 128, 255, 255]);
}

#[test]
fn png_writers_reject_wrong_lengths() {
    let dims = GridDims::new(2, 2).unwrap();
    let path = Path::new("target/io_unit/never_written.png");
    assert!(write_rgba8_png(path, dims, &[0; 15]).is_err());
    assert!(write_mask_png(path, dims, &[0.0; 3]).is_err());
    assert!(!path.exists());
}

#[test]
fn mask_png_round_trips_through_decoder() {
    let dir = Path::new("target").join("io_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("mask.png");

    let dims = GridDims::new(2, 1).unwrap();
    write_mask_png(&path, dims, &[0.0, 1.0]).unwrap();
    let (got_dims, mask) = decode_mask(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(got_dims, dims);
    assert_eq!(mask, vec![0.0, 1.0]);
}
