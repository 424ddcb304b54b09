use std::io::Cursor;

use base64::Engine as _;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let bytes = png_bytes(3, 2, [100, 50, 200, 128]);
    let bg = Background::decode(&bytes).unwrap();
    assert_eq!(bg.canvas(), Canvas::new(3, 2).unwrap());
    assert_eq!(
        &bg.rgba8_premul()[..4],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_is_a_load_error() {
    let err = Background::decode(b"definitely not an image").unwrap_err();
    assert!(err.is_load());
}

#[test]
fn parse_classifies_references() {
    assert!(matches!(
        BackgroundSource::parse("data:image/png;base64,AAAA"),
        BackgroundSource::DataUrl(_)
    ));
    assert!(matches!(
        BackgroundSource::parse("HTTPS://example.com/bg.png"),
        BackgroundSource::Remote(_)
    ));
    assert_eq!(
        BackgroundSource::parse("art/bg.png"),
        BackgroundSource::Path(PathBuf::from("art/bg.png"))
    );
}

#[test]
fn relative_paths_resolve_against_base() {
    let src = BackgroundSource::parse("bg.png").resolve_against(Path::new("/tmp/posters"));
    assert_eq!(
        src,
        BackgroundSource::Path(PathBuf::from("/tmp/posters/bg.png"))
    );

    let abs = BackgroundSource::parse("/abs/bg.png").resolve_against(Path::new("/tmp"));
    assert_eq!(abs, BackgroundSource::Path(PathBuf::from("/abs/bg.png")));
}

#[test]
fn loads_base64_data_url() {
    let bytes = png_bytes(4, 4, [0, 255, 0, 255]);
    let url = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    );
    let bg = Background::load(&BackgroundSource::parse(&url)).unwrap();
    assert_eq!(bg.canvas().width, 4);
    assert_eq!(&bg.rgba8_premul()[..4], &[0, 255, 0, 255]);
}

#[test]
fn non_base64_data_url_is_rejected() {
    assert!(decode_data_url("data:text/plain,hello").unwrap_err().is_load());
    assert!(decode_data_url("data:image/png;base64").unwrap_err().is_load());
}

#[test]
fn remote_and_missing_sources_fail_to_load() {
    let remote = BackgroundSource::parse("https://example.com/bg.png");
    assert!(Background::load(&remote).unwrap_err().is_load());

    let missing = BackgroundSource::Path(PathBuf::from("does/not/exist.png"));
    let err = Background::load(&missing).unwrap_err();
    assert!(err.is_load());
    assert!(err.to_string().contains("exist.png"));
}

#[test]
fn from_bytes_source_and_size_mismatch() {
    let bytes: Arc<[u8]> = png_bytes(2, 2, [9, 9, 9, 255]).into();
    let bg = Background::load(&BackgroundSource::Bytes(bytes)).unwrap();
    assert_eq!(bg.canvas().height, 2);

    assert!(Background::from_straight_rgba8(2, 2, vec![0; 3]).is_err());
}

#[test]
fn describe_hides_data_url_payload() {
    let d = BackgroundSource::DataUrl("data:image/png;base64,QUJD".to_owned()).describe();
    assert!(d.starts_with("data:image/png;base64,<"));
    assert!(!d.contains("QUJD"));
}
