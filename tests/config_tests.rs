// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use fill_light::Config;
use fill_light::config::AppTheme;
use fill_light::constants::PhotoQuality;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(
        config.mirror_preview,
        "Mirror preview should be enabled by default"
    );
    assert!(
        !config.keep_camera_warm,
        "Camera should stop when leaving selfie mode by default"
    );
    assert_eq!(config.app_theme, AppTheme::System);
    assert_eq!(config.photo_quality, PhotoQuality::default());
}

#[test]
fn test_app_theme_index_matches_dropdown_order() {
    for (index, theme) in AppTheme::ALL.iter().enumerate() {
        assert_eq!(theme.index(), index);
    }
}
