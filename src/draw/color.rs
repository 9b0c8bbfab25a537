//! RGBA color type and the fixed stroke/fill palettes.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use stagedraw::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let semi_transparent_blue = Color { r: 0.0, g: 0.0, b: 1.0, a: 0.5 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parses a `#RRGGBB` hex string (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Opaque white, used as the default export background.
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Fully transparent color.
pub const TRANSPARENT: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

/// A palette entry: display name, hex value and the parsed color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NamedColor {
    pub name: &'static str,
    pub hex: &'static str,
    pub color: Color,
}

const fn named(name: &'static str, hex: &'static str, r: u8, g: u8, b: u8) -> NamedColor {
    NamedColor {
        name,
        hex,
        color: Color::from_rgb8(r, g, b),
    }
}

// ============================================================================
// Stroke Palette
// ============================================================================

pub const NEON_PURPLE: NamedColor = named("Neon Purple", "#C724B1", 0xC7, 0x24, 0xB1);
pub const ANDES_SKY: NamedColor = named("Andes Sky", "#71DBD4", 0x71, 0xDB, 0xD4);
pub const IMPERIAL_PURPLE: NamedColor = named("Imperial Purple", "#642F6C", 0x64, 0x2F, 0x6C);
pub const EXPLORER_BLUE: NamedColor = named("Explorer Blue", "#58A7AF", 0x58, 0xA7, 0xAF);
pub const FILTERED_LIGHT: NamedColor = named("Filtered Light", "#B3B0C4", 0xB3, 0xB0, 0xC4);
pub const MAGIC_NIGHT: NamedColor = named("Magic Night", "#3A3A59", 0x3A, 0x3A, 0x59);
pub const FIG_PURPLE: NamedColor = named("Fig Purple", "#502B3A", 0x50, 0x2B, 0x3A);
pub const PUNKY_PINK: NamedColor = named("Punky Pink", "#B04A5A", 0xB0, 0x4A, 0x5A);
pub const SALMON_ORANGE: NamedColor = named("Salmon Orange", "#FF8D6D", 0xFF, 0x8D, 0x6D);
pub const GRAPEFRUIT: NamedColor = named("Grapefruit", "#FF585D", 0xFF, 0x58, 0x5D);
pub const ORANGE_DELIGHT: NamedColor = named("Orange Delight", "#FFC658", 0xFF, 0xC6, 0x58);
pub const PASTA_LUEGO: NamedColor = named("Pasta Luego", "#F9E27D", 0xF9, 0xE2, 0x7D);

/// Stroke colors in picker order. The first entry is the default.
pub const PALETTE: [NamedColor; 12] = [
    NEON_PURPLE,
    ANDES_SKY,
    IMPERIAL_PURPLE,
    EXPLORER_BLUE,
    FILTERED_LIGHT,
    MAGIC_NIGHT,
    FIG_PURPLE,
    PUNKY_PINK,
    SALMON_ORANGE,
    GRAPEFRUIT,
    ORANGE_DELIGHT,
    PASTA_LUEGO,
];

// ============================================================================
// Fill Palette
// ============================================================================

/// Fill slot value. `NoFill` makes the shape primitives skip the fill pass.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum FillColor {
    #[default]
    NoFill,
    Solid(NamedColor),
}

impl FillColor {
    pub const NO_FILL_NAME: &'static str = "No fill";
    pub const NO_FILL_HEX: &'static str = "transparent";

    /// Display name as shown in the fill picker.
    pub fn name(&self) -> &'static str {
        match self {
            FillColor::NoFill => Self::NO_FILL_NAME,
            FillColor::Solid(named) => named.name,
        }
    }

    /// Hex-like value; `"transparent"` for the no-fill sentinel.
    pub fn hex(&self) -> &'static str {
        match self {
            FillColor::NoFill => Self::NO_FILL_HEX,
            FillColor::Solid(named) => named.hex,
        }
    }

    /// The color to fill with, or `None` when filling should be skipped.
    pub fn color(&self) -> Option<Color> {
        match self {
            FillColor::NoFill => None,
            FillColor::Solid(named) => Some(named.color),
        }
    }

    /// Fill choices in picker order: `No fill` followed by the stroke palette.
    pub fn palette() -> impl Iterator<Item = FillColor> {
        std::iter::once(FillColor::NoFill).chain(PALETTE.iter().copied().map(FillColor::Solid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_hex_matches_channels() {
        for entry in PALETTE {
            assert_eq!(
                Color::from_hex(entry.hex),
                Some(entry.color),
                "{} has inconsistent channels",
                entry.name
            );
        }
    }

    #[test]
    fn from_hex_rejects_malformed_values() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GG0000").is_none());
        assert!(Color::from_hex("transparent").is_none());
        assert_eq!(Color::from_hex("ffffff"), Some(WHITE));
    }

    #[test]
    fn fill_palette_starts_with_no_fill() {
        let fills: Vec<FillColor> = FillColor::palette().collect();
        assert_eq!(fills.len(), PALETTE.len() + 1);
        assert_eq!(fills[0], FillColor::NoFill);
        assert_eq!(fills[0].hex(), "transparent");
        assert!(fills[0].color().is_none());
        assert_eq!(fills[1], FillColor::Solid(NEON_PURPLE));
    }
}
