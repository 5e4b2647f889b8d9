//! SVG Icon component for consistent icon rendering
//!
//! Icons are stored in assets/icons/ as SVG files and loaded through the
//! application's asset source.

use driftdesk_core::FileKind;
use gpui::*;

/// Icon names corresponding to SVG files in assets/icons/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconName {
    UploadCloud,
    Paintbrush,
    File,
    Image,
    Close,
    Chat,
    Ellipsis,
}

impl IconName {
    /// Get the path to the SVG file
    pub fn path(&self) -> &'static str {
        match self {
            IconName::UploadCloud => "icons/upload_cloud.svg",
            IconName::Paintbrush => "icons/paintbrush.svg",
            IconName::File => "icons/file.svg",
            IconName::Image => "icons/image.svg",
            IconName::Close => "icons/close.svg",
            IconName::Chat => "icons/chat.svg",
            IconName::Ellipsis => "icons/ellipsis.svg",
        }
    }

    /// Icon for a pending attachment
    pub fn for_attachment(kind: FileKind) -> Self {
        match kind {
            FileKind::Image => IconName::Image,
            FileKind::Pdf => IconName::File,
        }
    }
}

/// Standard icon sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum IconSize {
    /// Small: 14px
    Small,
    /// Medium: 16px (default)
    #[default]
    Medium,
    /// Large: 24px
    Large,
}

impl IconSize {
    pub fn px(&self) -> f32 {
        match self {
            IconSize::Small => 14.0,
            IconSize::Medium => 16.0,
            IconSize::Large => 24.0,
        }
    }
}

/// Create an SVG icon element
///
/// # Example
/// ```ignore
/// svg_icon(IconName::UploadCloud, IconSize::Large)
///     .text_color(opaque(colors.primary))
/// ```
pub fn svg_icon(name: IconName, size: IconSize) -> Svg {
    svg()
        .path(name.path())
        .size(px(size.px()))
        .flex_shrink_0()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_icons() {
        assert_eq!(IconName::for_attachment(FileKind::Image), IconName::Image);
        assert_eq!(IconName::for_attachment(FileKind::Pdf).path(), "icons/file.svg");
    }
}
