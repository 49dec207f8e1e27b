use super::*;

#[test]
fn encode_decode_preserves_samples() {
    let mut raster = Raster::blank(5, 3);
    assert!(raster.set_pixel(0, 0, &[255, 0, 0]));
    assert!(raster.set_pixel(4, 2, &[1, 2, 3]));
    assert!(raster.set_pixel(2, 1, &[90, 180, 45]));

    let codec = BmpCodec;
    let bytes = codec.encode(&raster).unwrap();
    assert_eq!(&bytes[..2], b"BM");

    let back = codec.decode(&bytes).unwrap();
    assert_eq!(back, raster);
}

#[test]
fn alpha_raster_has_no_writer() {
    let raster = Raster::black(2, 2, PixelLayout::Rgba8);
    let err = BmpCodec.encode(&raster).unwrap_err();
    assert!(matches!(err, ChartasError::Encoding(_)));
    assert!(err.to_string().contains("Rgba8"));
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(matches!(
        BmpCodec.decode(b"definitely not a bitmap"),
        Err(ChartasError::Decode(_))
    ));
}

#[test]
fn supports_only_rgb() {
    assert!(BmpCodec.supports(PixelLayout::Rgb8));
    assert!(!BmpCodec.supports(PixelLayout::Rgba8));
    assert_eq!(BmpCodec.extension(), "bmp");
}
