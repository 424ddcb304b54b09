use super::*;

#[test]
fn over_opaque_replaces_and_transparent_keeps() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [1, 2, 3, 255]), [1, 2, 3, 255]);
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn over_half_black_darkens_white() {
    let out = over([255, 255, 255, 255], [0, 0, 0, 128]);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 127);
}

#[test]
fn over_in_place_checks_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());

    let src = vec![0, 0, 0, 0, 9, 9, 9, 255];
    over_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst, vec![0, 0, 0, 0, 9, 9, 9, 255]);
}

#[test]
fn over_patch_clips_at_edges() {
    let (w, h) = (3u32, 2u32);
    let mut dst = vec![0u8; 3 * 2 * 4];
    let patch = Patch {
        x: -1,
        y: 1,
        width: 2,
        height: 2,
        data: [255u8, 0, 0, 255].repeat(4),
    };
    over_patch(&mut dst, w, h, &patch).unwrap();

    // Only canvas pixel (0, 1) is covered.
    let covered: Vec<usize> = dst
        .chunks_exact(4)
        .enumerate()
        .filter(|(_, px)| px[3] != 0)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(covered, vec![3]);
}

#[test]
fn over_patch_fully_outside_is_noop() {
    let mut dst = vec![7u8; 4 * 4];
    let patch = Patch {
        x: 10,
        y: 10,
        width: 1,
        height: 1,
        data: vec![255; 4],
    };
    over_patch(&mut dst, 2, 2, &patch).unwrap();
    assert!(dst.iter().all(|&b| b == 7));
}
