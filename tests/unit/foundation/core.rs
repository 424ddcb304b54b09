use super::*;

#[test]
fn canvas_rejects_zero_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());

    let c = Canvas::new(640, 480).unwrap();
    assert_eq!(c.width_u16(), 640);
    assert_eq!(c.height_u16(), 480);
    assert_eq!(c.rgba_len(), 640 * 480 * 4);
}

#[test]
fn premultiply_rounds_half_alpha() {
    let mut px = vec![255u8, 128, 0, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![128, 64, 0, 128]);
}

#[test]
fn premultiply_then_unpremultiply_keeps_opaque_pixels() {
    let mut px = vec![10u8, 20, 30, 255, 200, 100, 50, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);

    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
}

#[test]
fn unpremultiply_half_alpha_is_close() {
    let mut px = vec![100u8, 50, 25, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert!((i32::from(px[0]) - 199).abs() <= 1);
    assert!((i32::from(px[1]) - 100).abs() <= 1);
    assert_eq!(px[3], 128);
}
