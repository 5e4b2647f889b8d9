//! Theme system for Driftdesk
//!
//! Provides color definitions, spacing and layout constants.

mod colors;

pub use colors::*;

/// Theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub colors: ThemeColors,
    pub spacing: Spacing,
    pub typography: Typography,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create the default dark theme
    pub fn dark() -> Self {
        Self {
            colors: ThemeColors::dark(),
            spacing: Spacing::default(),
            typography: Typography::default(),
        }
    }

    /// Resolve a theme by its settings name; unknown names fall back to dark
    pub fn named(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            other => {
                tracing::warn!("Unknown theme '{}', using dark", other);
                Self::dark()
            }
        }
    }
}

/// Spacing constants
#[derive(Debug, Clone)]
pub struct Spacing {
    /// Extra small spacing (4px)
    pub xs: f32,
    /// Small spacing (8px)
    pub sm: f32,
    /// Medium spacing (12px)
    pub md: f32,
    /// Large spacing (16px)
    pub lg: f32,
    /// Extra extra large spacing (32px)
    pub xxl: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            xs: 4.0,
            sm: 8.0,
            md: 12.0,
            lg: 16.0,
            xxl: 32.0,
        }
    }
}

/// Typography settings
#[derive(Debug, Clone)]
pub struct Typography {
    pub base_size: f32,
    pub small_size: f32,
    pub header_size: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            base_size: 14.0,
            small_size: 12.0,
            header_size: 18.0,
        }
    }
}

/// Layout constants
pub mod layout {
    /// Sidebar width in pixels
    pub const SIDEBAR_WIDTH: f32 = 240.0;
    /// Input bar height in pixels
    pub const INPUT_BAR_HEIGHT: f32 = 56.0;
    /// Thread list row height in pixels
    pub const THREAD_ROW_HEIGHT: f32 = 48.0;
    /// Border radius
    pub const BORDER_RADIUS: f32 = 8.0;
    /// Border radius small
    pub const BORDER_RADIUS_SM: f32 = 4.0;
    /// Clean-thread dialog width
    pub const MODAL_WIDTH: f32 = 400.0;
    /// Toast width
    pub const TOAST_WIDTH: f32 = 320.0;
}

/// Convert a theme color into a GPUI color at full opacity
pub fn opaque(c: Rgba) -> gpui::Rgba {
    gpui::Rgba {
        r: c.r,
        g: c.g,
        b: c.b,
        a: 1.0,
    }
}

/// Convert a theme color into a GPUI color, keeping its alpha
pub fn translucent(c: Rgba) -> gpui::Rgba {
    gpui::Rgba {
        r: c.r,
        g: c.g,
        b: c.b,
        a: c.a,
    }
}
