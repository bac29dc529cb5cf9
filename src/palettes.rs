//! Palette registry for loading and accessing color palettes
//!
//! Loads palettes from palettes.json (embedded at compile time) and provides
//! access by name. The five categorical palettes carry eight colors each;
//! colors repeat after exhausting the list.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../palettes.json");

/// Gray fallback used when a palette or color cannot be resolved
const FALLBACK_HEX: &str = "#808080";

/// Global palette registry, initialized lazily on first access
pub static PALETTE_REGISTRY: Lazy<PaletteRegistry> = Lazy::new(|| {
    PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
        eprintln!("ERROR: Failed to load palettes.json: {}", e);
        PaletteRegistry::default()
    })
});

/// Default palette name
pub const DEFAULT_PALETTE: &str = "Classic";

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    pub colors: Vec<String>,
}

impl PaletteDefinition {
    /// Get a color by index as a hex string (wraps around past the end)
    pub fn color_hex(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            return FALLBACK_HEX;
        }
        &self.colors[index % self.colors.len()]
    }

    /// Get a color by index as RGB (wraps around past the end)
    pub fn get_color(&self, index: usize) -> [u8; 3] {
        parse_hex_color(self.color_hex(index)).unwrap_or([128, 128, 128])
    }

    /// Number of colors in this palette
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the palette is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// All palettes by name (lowercase keys for case-insensitive lookup)
    palettes: HashMap<String, PaletteDefinition>,
    /// Palette names in definition order (for listing)
    names: Vec<String>,
}

impl PaletteRegistry {
    /// Load palettes from JSON string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse palettes JSON: {}", e))?;

        let mut registry = Self::default();
        for def in definitions {
            registry.names.push(def.name.clone());
            // Store with lowercase key for case-insensitive lookup
            registry.palettes.insert(def.name.to_lowercase(), def);
        }

        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }

    /// Get the default palette
    pub fn default_palette(&self) -> Option<&PaletteDefinition> {
        self.get(DEFAULT_PALETTE)
    }

    /// List all palette names in definition order
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Parse a hex color string to RGB array
///
/// Supports formats:
/// - `#RRGGBB` (6 hex digits)
/// - `#RRGGBBAA` (8 hex digits, alpha ignored)
/// - `RRGGBB` / `RRGGBBAA` (without #)
fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 && hex.len() != 8 {
        eprintln!("WARN: Invalid hex color length '{}': {}", hex, hex.len());
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

/// Assign one color per group: index in group order modulo palette size
///
/// Falls back to the default palette when the named palette is not found.
pub fn group_colors(group_order: &[String], palette_name: &str) -> HashMap<String, String> {
    let registry = &*PALETTE_REGISTRY;
    let palette = registry.get(palette_name).or_else(|| registry.default_palette());

    group_order
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let hex = palette.map(|p| p.color_hex(i)).unwrap_or(FALLBACK_HEX);
            (group.clone(), hex.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        // 6-digit hex
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#1f77b4"), Some([31, 119, 180]));

        // Without #
        assert_eq!(parse_hex_color("FF0000"), Some([255, 0, 0]));

        // 8-digit hex (with alpha, ignored)
        assert_eq!(parse_hex_color("#440154FF"), Some([68, 1, 84]));

        // Invalid
        assert_eq!(parse_hex_color("#FFF"), None); // Too short
        assert_eq!(parse_hex_color("GGGGGG"), None); // Invalid hex
    }

    #[test]
    fn test_palette_registry_loads() {
        let registry = &*PALETTE_REGISTRY;

        // Five palettes of eight colors each
        assert_eq!(registry.names().len(), 5);
        for name in registry.names() {
            assert_eq!(registry.get(name).unwrap().len(), 8);
        }

        // Case-insensitive lookup
        let classic = registry.get("classic").unwrap();
        assert_eq!(classic.name, "Classic");
        assert_eq!(classic.color_hex(0), "#1f77b4");
        assert_eq!(classic.get_color(0), [31, 119, 180]);
    }

    #[test]
    fn test_palette_color_wrapping() {
        let palette = PALETTE_REGISTRY.get("Vibrant").unwrap();
        let len = palette.len();

        assert_eq!(palette.color_hex(0), palette.color_hex(len));
        assert_eq!(palette.color_hex(1), palette.color_hex(len + 1));
    }

    #[test]
    fn test_group_colors_follow_group_order() {
        let groups = vec![
            "Placebo".to_string(),
            "Drug A".to_string(),
            "Drug B".to_string(),
        ];
        let colors = group_colors(&groups, "Medical");

        assert_eq!(colors["Placebo"], "#2E86C1");
        assert_eq!(colors["Drug A"], "#E74C3C");
        assert_eq!(colors["Drug B"], "#27AE60");
    }

    #[test]
    fn test_group_colors_unknown_palette_falls_back() {
        let groups = vec!["Placebo".to_string()];
        let colors = group_colors(&groups, "NoSuchPalette");
        assert_eq!(colors["Placebo"], "#1f77b4"); // first Classic color
    }
}
