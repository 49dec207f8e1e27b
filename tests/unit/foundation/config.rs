use super::*;

fn temp_file(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "chartas_{name}_{}_{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn defaults_match_service_constants() {
    let cfg = StoreConfig::default();
    assert_eq!(cfg.stripes, 200);
    assert_eq!(cfg.extension, "bmp");
    cfg.validate().unwrap();

    let limits = SizeLimits::default();
    assert_eq!(limits.canvas_max_width, 20_000);
    assert_eq!(limits.canvas_max_height, 50_000);
    assert_eq!(limits.segment_max_width, 5_000);
    assert_eq!(limits.segment_max_height, 5_000);
}

#[test]
fn zero_stripes_is_rejected() {
    let cfg = StoreConfig {
        stripes: 0,
        ..StoreConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(ChartasError::Config(_))));
}

#[test]
fn extension_with_separator_is_rejected() {
    let cfg = StoreConfig {
        extension: "../bmp".to_string(),
        ..StoreConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(ChartasError::Config(_))));
}

#[test]
fn json_file_fills_missing_fields_with_defaults() {
    let path = temp_file("config_partial");
    std::fs::write(&path, r#"{ "root": "/var/lib/chartas", "stripes": 16 }"#).unwrap();

    let cfg = StoreConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.root, PathBuf::from("/var/lib/chartas"));
    assert_eq!(cfg.stripes, 16);
    assert_eq!(cfg.extension, "bmp");

    std::fs::remove_file(&path).ok();
}

#[test]
fn json_file_with_unknown_field_is_config_error() {
    let path = temp_file("config_unknown");
    std::fs::write(&path, r#"{ "stripe_count": 16 }"#).unwrap();

    assert!(matches!(
        StoreConfig::from_json_file(&path),
        Err(ChartasError::Config(_))
    ));

    std::fs::remove_file(&path).ok();
}

#[test]
fn limits_accept_bounds_and_reject_outside() {
    let limits = SizeLimits::default();
    limits.check_canvas(1, 1).unwrap();
    limits.check_canvas(20_000, 50_000).unwrap();
    limits.check_segment(5_000, 5_000).unwrap();

    assert!(matches!(
        limits.check_canvas(0, 10),
        Err(ChartasError::LimitExceeded { what: "width", .. })
    ));
    assert!(matches!(
        limits.check_canvas(10, 50_001),
        Err(ChartasError::LimitExceeded { what: "height", .. })
    ));
    assert!(matches!(
        limits.check_segment(5_001, 1),
        Err(ChartasError::LimitExceeded { what: "width", .. })
    ));
}
