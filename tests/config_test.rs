use multi_dex_price_scanner::{PriceScannerError, ScannerConfig, Source};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_defaults_match_original_scanner_settings() {
    let config = ScannerConfig::default();

    assert_eq!(config.interval(), Duration::from_secs(2));
    assert_eq!(config.timeout(), Duration::from_secs(3));
    assert_eq!(config.min_spread_pct, 0.3);
    assert_eq!(config.sources, Source::builtin());
    assert_eq!(config.tokens.len(), 7);
    assert_eq!(
        config.output_path,
        Some(PathBuf::from("multi_dex_prices.json"))
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = ScannerConfig::from_toml(
        r#"
        min_spread_pct = 0.15
        sources = ["jupiter", "Orca", "raydium"]

        [[tokens]]
        symbol = "SOL"
        mint = "So11111111111111111111111111111111111111112"

        [[tokens]]
        symbol = "USDC"
        mint = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"
        peg = 1.0
        "#,
    )
    .unwrap();

    assert_eq!(config.min_spread_pct, 0.15);
    assert_eq!(config.interval_ms, 2_000);
    assert_eq!(
        config.sources,
        vec![Source::Jupiter, Source::Orca, Source::Raydium]
    );
    let registry = config.registry().unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get("USDC").unwrap().peg, Some(1.0));
    assert!(config.validate().is_ok());
}

#[test]
fn test_validation_rejects_bad_values() {
    let negative = ScannerConfig {
        min_spread_pct: -0.1,
        ..ScannerConfig::default()
    };
    assert!(matches!(negative.validate(), Err(PriceScannerError::Config(_))));

    let zero_timeout = ScannerConfig {
        timeout_ms: 0,
        ..ScannerConfig::default()
    };
    assert!(zero_timeout.validate().is_err());

    let no_sources = ScannerConfig {
        sources: vec![],
        ..ScannerConfig::default()
    };
    assert!(no_sources.validate().is_err());

    let no_tokens = ScannerConfig {
        tokens: vec![],
        ..ScannerConfig::default()
    };
    assert!(matches!(
        no_tokens.validate(),
        Err(PriceScannerError::InvalidToken(_))
    ));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let result = ScannerConfig::from_toml("interval_ms = \"soon\"");
    assert!(matches!(result, Err(PriceScannerError::Config(_))));
}

#[test]
fn test_load_reads_file() {
    let path = std::env::temp_dir().join(format!("scanner_config_test_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "interval_ms = 500\ntimeout_ms = 250\nbirdeye_api_key = \"from-file\"\n",
    )
    .unwrap();

    let config = ScannerConfig::load(Some(&path)).unwrap();
    assert_eq!(config.interval(), Duration::from_millis(500));
    assert_eq!(config.timeout(), Duration::from_millis(250));
    assert_eq!(config.birdeye_api_key.as_deref(), Some("from-file"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_load_defers_validation_to_caller() {
    let path = std::env::temp_dir().join(format!(
        "scanner_config_override_test_{}.toml",
        std::process::id()
    ));
    std::fs::write(&path, "min_spread_pct = -1.0\n").unwrap();

    let mut config = ScannerConfig::load(Some(&path)).unwrap();
    assert!(config.validate().is_err());

    // A command-line override fixes the file value before validation
    config.min_spread_pct = 0.3;
    assert!(config.validate().is_ok());

    let _ = std::fs::remove_file(&path);
}
