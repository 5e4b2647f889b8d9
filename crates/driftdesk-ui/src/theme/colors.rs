//! Color definitions for the Driftdesk theme

/// RGBA color representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Create a new RGBA color from 0-255 values
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex value (0xRRGGBBAA)
    pub const fn from_hex(hex: u32) -> Self {
        Self::new(
            ((hex >> 24) & 0xFF) as u8,
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Create opaque color from RGB hex (0xRRGGBB)
    pub const fn rgb(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
            255,
        )
    }

    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha,
        }
    }
}

/// Theme color palette
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // === Backgrounds ===
    pub sidebar_bg: Rgba,
    pub panel_bg: Rgba,
    /// Surface/card background
    pub surface: Rgba,
    pub surface_elevated: Rgba,
    pub input_bg: Rgba,
    /// Backdrop behind the drop overlay and modals
    pub overlay_bg: Rgba,

    // === Brand Colors ===
    pub primary: Rgba,
    pub primary_hover: Rgba,

    // === Text Colors ===
    pub text_primary: Rgba,
    pub text_secondary: Rgba,
    pub text_on_primary: Rgba,

    // === Status Colors ===
    /// Destructive actions and rejected drops
    pub error: Rgba,
    pub error_hover: Rgba,

    // === UI Elements ===
    pub border: Rgba,
    pub hover: Rgba,
    pub selection: Rgba,
}

impl ThemeColors {
    /// Create the dark theme color palette
    pub fn dark() -> Self {
        Self {
            sidebar_bg: Rgba::rgb(0x1a1e2a),
            panel_bg: Rgba::rgb(0x282c34),
            surface: Rgba::rgb(0x21252b),
            surface_elevated: Rgba::rgb(0x2c313a),
            input_bg: Rgba::rgb(0x1e2228),
            overlay_bg: Rgba::from_hex(0x181b22e6),

            primary: Rgba::rgb(0x3b82f6),
            primary_hover: Rgba::rgb(0x60a5fa),

            text_primary: Rgba::rgb(0xeceff4),
            text_secondary: Rgba::rgb(0x8b949e),
            text_on_primary: Rgba::rgb(0xffffff),

            error: Rgba::rgb(0xf85149),
            error_hover: Rgba::rgb(0xff6a61),

            border: Rgba::rgb(0x4a5260),
            hover: Rgba::from_hex(0xb1bac420),
            selection: Rgba::from_hex(0x388bfd33),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        let c = Rgba::rgb(0xff0000);
        assert_eq!((c.r, c.g, c.b, c.a), (1.0, 0.0, 0.0, 1.0));

        let c = Rgba::from_hex(0x00000000);
        assert_eq!(c.a, 0.0);
        assert_eq!(Rgba::rgb(0x123456).with_alpha(0.5).a, 0.5);
    }
}
