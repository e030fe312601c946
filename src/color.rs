use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::ThemeConfig;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Parse `#rrggbb` / `rrggbb`.
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let rgb: Srgb<u8> = hex.trim().parse().ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// The configured palette, skipping entries that are not valid hex colours.
pub fn theme_palette(theme: &ThemeConfig) -> Vec<Color32> {
    theme
        .palette
        .iter()
        .filter_map(|hex| {
            let color = parse_hex(hex);
            if color.is_none() {
                log::warn!("ignoring invalid palette colour '{hex}'");
            }
            color
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: series name → Color32
// ---------------------------------------------------------------------------

/// Assigns palette colours to series names in the order they are given.
///
/// When there are more series than palette entries the remainder is filled
/// with generated hues.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<S: AsRef<str>>(names: &[S], palette: &[Color32]) -> Self {
        let extra = generate_palette(names.len().saturating_sub(palette.len()));
        let colors = palette.iter().copied().chain(extra);

        let mapping = names
            .iter()
            .map(|n| n.as_ref().to_string())
            .zip(colors)
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given series.
    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping
            .get(name)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(parse_hex("#0a9396"), Some(Color32::from_rgb(0x0a, 0x93, 0x96)));
        assert_eq!(parse_hex("ee9b00"), Some(Color32::from_rgb(0xee, 0x9b, 0x00)));
        assert_eq!(parse_hex("rgb(1,2,3)"), None);
    }

    #[test]
    fn theme_palette_skips_invalid_entries() {
        let theme = ThemeConfig {
            palette: vec!["#000000".into(), "nope".into(), "#ffffff".into()],
        };
        assert_eq!(
            theme_palette(&theme),
            vec![Color32::BLACK, Color32::WHITE]
        );
    }

    #[test]
    fn color_map_extends_short_palette() {
        let names = ["a", "b", "c"];
        let map = ColorMap::new(&names, &[Color32::RED]);

        assert_eq!(map.color_for("a"), Color32::RED);
        assert_ne!(map.color_for("b"), Color32::GRAY);
        assert_eq!(map.color_for("zzz"), Color32::GRAY);
        assert_ne!(map.color_for("b"), map.color_for("c"));
    }
}
