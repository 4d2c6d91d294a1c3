use super::*;

// =============================================================
// resolve
// =============================================================

#[test]
fn resolve_is_total_over_modes_and_signals() {
    for system in [ResolvedTheme::Light, ResolvedTheme::Dark] {
        assert_eq!(resolve(ThemeMode::Light, system), ResolvedTheme::Light);
        assert_eq!(resolve(ThemeMode::Dark, system), ResolvedTheme::Dark);
        assert_eq!(resolve(ThemeMode::System, system), system);
    }
}

// =============================================================
// ThemeMode
// =============================================================

#[test]
fn parse_accepts_the_three_stored_names() {
    for mode in ThemeMode::ALL {
        assert_eq!(ThemeMode::parse(mode.as_str()), Ok(mode));
    }
}

#[test]
fn parse_rejects_other_values() {
    for raw in ["", "Dark", " light", "auto", "true"] {
        assert_eq!(ThemeMode::parse(raw), Err(PreferenceError::Invalid(raw.to_owned())));
    }
}

#[test]
fn from_str_and_display_agree_with_storage_names() {
    let mode: ThemeMode = "system".parse().unwrap();
    assert_eq!(mode, ThemeMode::System);
    assert_eq!(mode.to_string(), "system");
}

#[test]
fn default_mode_is_dark() {
    assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    assert_eq!(ResolvedTheme::default(), ResolvedTheme::Dark);
}

// =============================================================
// ResolvedTheme
// =============================================================

#[test]
fn prefers_dark_maps_to_resolved_theme() {
    assert_eq!(ResolvedTheme::from_prefers_dark(true), ResolvedTheme::Dark);
    assert_eq!(ResolvedTheme::from_prefers_dark(false), ResolvedTheme::Light);
}

#[test]
fn opposite_flips() {
    assert_eq!(ResolvedTheme::Dark.opposite(), ResolvedTheme::Light);
    assert_eq!(ResolvedTheme::Light.opposite(), ResolvedTheme::Dark);
}

#[test]
fn resolved_converts_to_explicit_mode() {
    assert_eq!(ThemeMode::from(ResolvedTheme::Light), ThemeMode::Light);
    assert_eq!(ThemeMode::from(ResolvedTheme::Dark), ThemeMode::Dark);
}

#[test]
fn serde_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&ThemeMode::System).unwrap(), "\"system\"");
    let resolved: ResolvedTheme = serde_json::from_str("\"light\"").unwrap();
    assert_eq!(resolved, ResolvedTheme::Light);
}
