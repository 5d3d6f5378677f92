// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use fill_light::constants::{PRESETS_KEY, PhotoQuality, panel};

#[test]
fn test_presets_key_is_stable() {
    // Changing the key orphans every saved preset
    assert_eq!(PRESETS_KEY, "ColorPresets");
}

#[test]
fn test_photo_quality_ordering() {
    let mut prev = 0u8;
    for quality in PhotoQuality::ALL {
        let jpeg = quality.jpeg_quality();
        assert!(
            jpeg > prev,
            "Presets should be ordered from lowest to highest"
        );
        assert!(jpeg <= 100);
        prev = jpeg;
    }
}

#[test]
fn test_photo_quality_index_round_trips() {
    for (index, quality) in PhotoQuality::ALL.iter().enumerate() {
        assert_eq!(quality.index(), index);
        assert_eq!(PhotoQuality::from_index(index), Some(*quality));
    }
    assert_eq!(PhotoQuality::from_index(PhotoQuality::ALL.len()), None);
}

#[test]
fn test_slider_range_covers_defaults() {
    assert!((panel::SLIDER_MIN as f64..=panel::SLIDER_MAX as f64).contains(&panel::DEFAULT_CHANNEL));
    assert!(
        (panel::SLIDER_MIN as f64..=panel::SLIDER_MAX as f64).contains(&panel::DEFAULT_BRIGHTNESS)
    );
}
