use datagrid::theme::{Color, Theme, ThemeMode, DARK_YAML, LIGHT_YAML};

#[test]
fn test_color_from_hex() {
    let color = Color::from_hex("#1E1E1E").unwrap();
    assert_eq!(color.r, 0x1E);
    assert_eq!(color.g, 0x1E);
    assert_eq!(color.b, 0x1E);
}

#[test]
fn test_color_from_hex_rejects_bad_input() {
    assert!(Color::from_hex("#12").is_err());
    assert!(Color::from_hex("#GG0000").is_err());
    // Six bytes, but not six hex digits
    assert!(Color::from_hex("aé€").is_err());
    assert!(Color::from_hex("#ééé").is_err());
}

#[test]
fn test_non_ascii_color_in_theme_is_error() {
    let yaml = r##"
version: 1
name: "Broken"
mode: dark
grid:
  background: "aé€"
  foreground: "#D4D4D4"
  header_background: "#252526"
  header_foreground: "#FFFFFF"
  row_alt_background: "#202020"
  pinned_background: "#2A2D2E"
"##;
    assert!(Theme::from_yaml(yaml).is_err());
}

#[test]
fn test_color_ansi_escapes() {
    let color = Color::rgb(1, 2, 3);
    assert_eq!(color.ansi_fg(), "\x1b[38;2;1;2;3m");
    assert_eq!(color.ansi_bg(), "\x1b[48;2;1;2;3m");
}

#[test]
fn test_builtin_dark() {
    let theme = Theme::builtin(ThemeMode::Dark);
    assert_eq!(theme.name, "Grid Dark");
    assert_eq!(theme.background, Color::rgb(0x1E, 0x1E, 0x1E));
}

#[test]
fn test_builtin_light_is_lighter() {
    let dark = Theme::from_yaml(DARK_YAML).unwrap();
    let light = Theme::from_yaml(LIGHT_YAML).unwrap();
    let luma = |c: Color| c.r as u32 + c.g as u32 + c.b as u32;
    assert!(luma(light.background) > luma(dark.background));
    assert_eq!(light.mode, ThemeMode::Light);
}

#[test]
fn test_optional_colors_default_to_foreground() {
    let yaml = r##"
version: 1
name: "Minimal"
mode: light
grid:
  background: "#FFFFFF"
  foreground: "#111111"
  header_background: "#EEEEEE"
  header_foreground: "#000000"
  row_alt_background: "#F5F5F5"
  pinned_background: "#E0E8FF"
"##;
    let theme = Theme::from_yaml(yaml).unwrap();
    assert_eq!(theme.border, Color::rgb(0x11, 0x11, 0x11));
    assert_eq!(theme.muted_foreground, theme.foreground);
}

#[test]
fn test_bad_color_is_error() {
    let yaml = DARK_YAML.replace("#1E1E1E", "#XYZXYZ");
    assert!(Theme::from_yaml(&yaml).is_err());
}

#[test]
fn test_user_theme_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dark.yaml");
    std::fs::write(&path, DARK_YAML.replace("Grid Dark", "My Dark")).unwrap();
    let theme = Theme::from_file(&path).unwrap();
    assert_eq!(theme.name, "My Dark");
}
