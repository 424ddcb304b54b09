use serde_json::json;

use super::*;

#[test]
fn new_document_uses_studio_defaults() {
    let doc = PosterDocument::new("bg.png", None, Some(""));
    assert_eq!(doc.headline.text, "YOUR HEADLINE");
    assert_eq!(doc.subtext.text, "Add your details here");
    assert_eq!(doc.headline.font_size_percent, 8.0);
    assert_eq!(doc.headline.position_y_percent, 40.0);
    assert_eq!(doc.subtext.font_size_percent, 3.5);
    assert_eq!(doc.subtext.position_y_percent, 65.0);
    assert_eq!(doc.headline.font_weight, FontWeight::Bold);
    assert_eq!(doc.subtext.font_weight, FontWeight::Medium);
    assert_eq!(doc.style.text_color, TextColor::BLACK);
    assert_eq!(doc.style.text_align, TextAlign::Center);
    assert!(!doc.style.shadow_enabled);
    doc.validate().unwrap();
}

#[test]
fn provider_text_overrides_placeholders() {
    let doc = PosterDocument::new("bg.png", Some("SUMMER SALE"), Some("50% off"));
    assert_eq!(doc.headline.text, "SUMMER SALE");
    assert_eq!(doc.subtext.text, "50% off");
}

#[test]
fn pixel_sizes_round_against_height() {
    let canvas = Canvas::new(1000, 1000).unwrap();
    let doc = PosterDocument::new("bg.png", None, None);
    assert_eq!(doc.headline.font_size_px(canvas), 80);
    assert_eq!(doc.subtext.font_size_px(canvas), 35);

    let small = Canvas::new(40, 50).unwrap();
    let mut layer = doc.subtext.clone();
    layer.font_size_percent = 3.0;
    assert_eq!(layer.font_size_px(small), 2);
}

#[test]
fn anchors_scale_with_canvas() {
    let canvas = Canvas::new(800, 600).unwrap();
    let doc = PosterDocument::new("bg.png", None, None);
    assert_eq!(doc.headline.anchor_px(canvas), (400.0, 240.0));
    assert_eq!(doc.subtext.anchor_px(canvas), (400.0, 390.0));
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut doc = PosterDocument::new("bg.png", None, None);
    doc.headline.position_x_percent = 120.0;
    assert!(doc.validate().is_err());

    let mut doc = PosterDocument::new("bg.png", None, None);
    doc.subtext.font_size_percent = f64::NAN;
    assert!(doc.validate().is_err());

    let doc = PosterDocument::new("  ", None, None);
    assert!(doc.validate().is_err());
}

#[test]
fn partial_json_fills_missing_fields_from_defaults() {
    let doc = PosterDocument::from_json(
        &json!({
            "background": "bg.png",
            "headline": { "text": "HELLO\nWORLD", "font_size_percent": 12.5 },
            "style": { "text_align": "right", "text_color": "#FFFFFF" }
        })
        .to_string(),
    )
    .unwrap();

    assert_eq!(doc.headline.text, "HELLO\nWORLD");
    assert_eq!(doc.headline.font_size_percent, 12.5);
    assert_eq!(doc.headline.position_y_percent, 40.0);
    assert_eq!(doc.headline.font_weight, FontWeight::Bold);
    assert_eq!(doc.subtext.text, "Add your details here");
    assert_eq!(doc.style.text_align, TextAlign::Right);
    assert_eq!(doc.style.text_color, TextColor::rgb(255, 255, 255));
    assert!(!doc.style.shadow_enabled);
}

#[test]
fn json_round_trip_preserves_document() {
    let mut doc = PosterDocument::new("bg.png", Some("A"), Some("B"));
    doc.style.shadow_enabled = true;
    doc.subtext.font_weight = FontWeight::Bold;
    let back = PosterDocument::from_json(&doc.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn from_json_reports_bad_input() {
    assert!(matches!(
        PosterDocument::from_json("{}").unwrap_err(),
        PosterError::Serde(_)
    ));
    let bad = json!({ "background": "bg.png", "headline": { "position_y_percent": -1.0 } });
    assert!(matches!(
        PosterDocument::from_json(&bad.to_string()).unwrap_err(),
        PosterError::Validation(_)
    ));
}

#[test]
fn control_ranges_clamp() {
    assert_eq!(ControlRange::HEADLINE_SIZE.clamp(40.0).unwrap(), 20.0);
    assert_eq!(ControlRange::SUBTEXT_SIZE.clamp(0.1).unwrap(), 1.0);
    assert_eq!(ControlRange::POSITION_Y.clamp(5.0).unwrap(), 10.0);
    assert_eq!(ControlRange::POSITION_X.clamp(55.0).unwrap(), 55.0);
    assert!(ControlRange::POSITION_X.clamp(f64::INFINITY).is_err());
}

#[test]
fn role_metadata() {
    assert_eq!(LayerRole::DRAW_ORDER, [LayerRole::Headline, LayerRole::Subtext]);
    assert_eq!(LayerRole::Headline.line_height_multiplier(), 1.2);
    assert_eq!(LayerRole::Subtext.line_height_multiplier(), 1.4);
    assert_eq!(TextAlign::Right.anchor_fraction(), 1.0);
    assert_eq!(FontWeight::Medium.css_weight(), 500);
}
