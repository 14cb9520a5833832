use shadowlift_core::codec::DecodeLimits;
use shadowlift_core::error::ErrorKind;
use shadowlift_core::pipeline::config::EnhanceConfig;
use shadowlift_core::pipeline::EnhanceStage;
use shadowlift_core::tone::{ShadowCurve, ToneMode};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_enhance_config_defaults() {
    let config = EnhanceConfig::default();
    assert_eq!(config.shadow_lift, 30.0);
    assert_eq!(config.shadow_amount, 0.65);
    assert_eq!(config.mode, ToneMode::ShadowCurve);
    assert_eq!(config.output_quality, 90);
    assert_eq!(config.curve, ShadowCurve::default());
    assert_eq!(config.limits, DecodeLimits::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_tone_mode_default_is_shadow_curve() {
    assert_eq!(ToneMode::default(), ToneMode::ShadowCurve);
}

#[test]
fn test_adjustment_mirrors_config() {
    let config = EnhanceConfig {
        shadow_lift: 12.0,
        shadow_amount: 0.4,
        ..Default::default()
    };
    let adjustment = config.adjustment();
    assert_eq!(adjustment.shadow_lift, 12.0);
    assert_eq!(adjustment.shadow_amount, 0.4);
    assert_eq!(adjustment.curve, config.curve);
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn test_tone_mode_display() {
    assert_eq!(format!("{}", ToneMode::LinearOffset), "Linear offset");
    assert_eq!(format!("{}", ToneMode::ShadowCurve), "Shadow curve");
    assert_eq!(format!("{}", ToneMode::Combined), "Combined");
}

#[test]
fn test_stage_display() {
    assert_eq!(format!("{}", EnhanceStage::Decoding), "Decoding image");
    assert_eq!(format!("{}", EnhanceStage::Adjusting), "Lifting shadows");
    assert_eq!(format!("{}", EnhanceStage::Encoding), "Encoding JPEG");
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_empty_toml_gives_defaults() {
    let config: EnhanceConfig = toml::from_str("").unwrap();
    assert_eq!(config, EnhanceConfig::default());
}

#[test]
fn test_partial_toml_overrides() {
    let config: EnhanceConfig = toml::from_str(
        r#"
shadow_lift = 45.0
output_quality = 80

[curve]
magnitude = 64.0
"#,
    )
    .unwrap();
    assert_eq!(config.shadow_lift, 45.0);
    assert_eq!(config.output_quality, 80);
    assert_eq!(config.curve.magnitude, 64.0);
    assert_eq!(config.curve.threshold, 128.0);
    assert_eq!(config.shadow_amount, 0.65);
}

#[test]
fn test_mode_short_names() {
    for (text, mode) in [
        ("A", ToneMode::LinearOffset),
        ("B", ToneMode::ShadowCurve),
        ("LinearOffset", ToneMode::LinearOffset),
        ("ShadowCurve", ToneMode::ShadowCurve),
        ("Combined", ToneMode::Combined),
    ] {
        let config: EnhanceConfig = toml::from_str(&format!("mode = \"{text}\"")).unwrap();
        assert_eq!(config.mode, mode, "mode = {text}");
    }
}

#[test]
fn test_unknown_mode_is_rejected() {
    assert!(toml::from_str::<EnhanceConfig>("mode = \"C\"").is_err());
}

#[test]
fn test_config_toml_roundtrip() {
    let config = EnhanceConfig {
        mode: ToneMode::Combined,
        output_quality: 75,
        ..Default::default()
    };
    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: EnhanceConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_validate_rejects_zero_limits() {
    let config = EnhanceConfig {
        limits: DecodeLimits {
            max_width: 0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(config.validate().unwrap_err().kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_validate_rejects_quality_over_100() {
    let config = EnhanceConfig {
        output_quality: 101,
        ..Default::default()
    };
    assert_eq!(config.validate().unwrap_err().kind(), ErrorKind::InvalidArgument);
}
