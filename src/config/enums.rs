//! Configuration enum types.

use crate::draw::{Color, FillColor, NamedColor, PALETTE, color::WHITE};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a name/hex string or RGB values.
///
/// # Examples
/// ```toml
/// # Palette name or hex value
/// default_stroke_color = "Andes Sky"
/// default_fill_color = "#FF585D"
///
/// # No fill
/// default_fill_color = "none"
///
/// # RGB (0-255 per component)
/// background = [255, 255, 255]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Palette name ("Neon Purple") or hex value ("#C724B1")
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves to a stroke palette entry.
    ///
    /// Stroke colors are limited to the palette; anything else falls back to
    /// the first palette entry with a warning.
    pub fn to_stroke(&self) -> NamedColor {
        let resolved = match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name),
            ColorSpec::Rgb(rgb) => palette_entry_for_rgb(*rgb),
        };
        resolved.unwrap_or_else(|| {
            warn!("Stroke color {:?} is not in the palette, using {}", self, PALETTE[0].name);
            PALETTE[0]
        })
    }

    /// Resolves to a fill palette entry. Unknown values fall back to no fill.
    pub fn to_fill(&self) -> FillColor {
        let resolved = match self {
            ColorSpec::Name(name) => crate::util::name_to_fill(name),
            ColorSpec::Rgb(rgb) => palette_entry_for_rgb(*rgb).map(FillColor::Solid),
        };
        resolved.unwrap_or_else(|| {
            warn!("Fill color {:?} is not in the fill palette, using no fill", self);
            FillColor::NoFill
        })
    }

    /// Converts to an arbitrary opaque color (used for export backgrounds).
    ///
    /// Accepts palette names, `#RRGGBB` hex strings, `"white"`, `"black"` and
    /// `"transparent"`. Unknown names default to white with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => {
                let trimmed = name.trim();
                if trimmed.eq_ignore_ascii_case("white") {
                    return WHITE;
                }
                if trimmed.eq_ignore_ascii_case("black") {
                    return Color::new(0.0, 0.0, 0.0, 1.0);
                }
                if trimmed.eq_ignore_ascii_case("transparent") {
                    return crate::draw::color::TRANSPARENT;
                }
                crate::util::name_to_color(trimmed)
                    .map(|named| named.color)
                    .or_else(|| Color::from_hex(trimmed))
                    .unwrap_or_else(|| {
                        warn!("Unknown color '{}', using white", name);
                        WHITE
                    })
            }
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

fn palette_entry_for_rgb(rgb: [u8; 3]) -> Option<NamedColor> {
    let target = Color::from_rgb8(rgb[0], rgb[1], rgb[2]);
    PALETTE.iter().find(|entry| entry.color == target).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{ANDES_SKY, GRAPEFRUIT, NEON_PURPLE};

    #[test]
    fn stroke_accepts_names_hex_and_palette_rgb() {
        assert_eq!(ColorSpec::Name("andes sky".into()).to_stroke(), ANDES_SKY);
        assert_eq!(ColorSpec::Name("#ff585d".into()).to_stroke(), GRAPEFRUIT);
        assert_eq!(ColorSpec::Rgb([0x71, 0xDB, 0xD4]).to_stroke(), ANDES_SKY);
    }

    #[test]
    fn stroke_outside_palette_falls_back_to_default() {
        assert_eq!(ColorSpec::Name("red".into()).to_stroke(), NEON_PURPLE);
        assert_eq!(ColorSpec::Rgb([1, 2, 3]).to_stroke(), NEON_PURPLE);
    }

    #[test]
    fn fill_understands_no_fill() {
        assert_eq!(ColorSpec::Name("none".into()).to_fill(), FillColor::NoFill);
        assert_eq!(ColorSpec::Name("No fill".into()).to_fill(), FillColor::NoFill);
        assert_eq!(
            ColorSpec::Name("Grapefruit".into()).to_fill(),
            FillColor::Solid(GRAPEFRUIT)
        );
        assert_eq!(ColorSpec::Name("mauve".into()).to_fill(), FillColor::NoFill);
    }

    #[test]
    fn background_accepts_free_form_colors() {
        assert_eq!(ColorSpec::Name("white".into()).to_color(), WHITE);
        assert_eq!(
            ColorSpec::Name("#000000".into()).to_color(),
            Color::new(0.0, 0.0, 0.0, 1.0)
        );
        assert_eq!(ColorSpec::Rgb([255, 255, 255]).to_color(), WHITE);
        assert_eq!(ColorSpec::Name("nonsense".into()).to_color(), WHITE);
    }

    #[test]
    fn untagged_deserialization() {
        #[derive(Deserialize)]
        struct Wrapper {
            color: ColorSpec,
        }
        let named: Wrapper = toml::from_str(r#"color = "Andes Sky""#).unwrap();
        assert_eq!(named.color, ColorSpec::Name("Andes Sky".to_string()));
        let rgb: Wrapper = toml::from_str("color = [1, 2, 3]").unwrap();
        assert_eq!(rgb.color, ColorSpec::Rgb([1, 2, 3]));
    }
}
