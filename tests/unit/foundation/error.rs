use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PosterError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PosterError::load("x").to_string().contains("load error:"));
    assert!(
        PosterError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        PosterError::export("x")
            .to_string()
            .contains("export error:")
    );
    assert!(
        PosterError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PosterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_load_errors_report_is_load() {
    assert!(PosterError::load("missing").is_load());
    assert!(!PosterError::render("missing").is_load());
}

#[test]
fn json_errors_map_to_serde() {
    let err = serde_json::from_str::<u32>("nope").unwrap_err();
    let err: PosterError = err.into();
    assert!(matches!(err, PosterError::Serde(_)));
}
