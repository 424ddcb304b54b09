use super::*;

#[test]
fn mul_div255_edges() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn add_saturates() {
    assert_eq!(add_sat_u8(200, 100), 255);
    assert_eq!(add_sat_u8(1, 2), 3);
}

#[test]
fn percent_of_extent() {
    assert_eq!(percent_of(1000, 40.0), 400.0);
    assert_eq!(percent_of(200, 0.0), 0.0);
    assert_eq!(percent_of(200, 100.0), 200.0);
}
