use bon::Builder;
use std::path::PathBuf;

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs `0xRRGGBB` into a color.
    pub const fn hex(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Fixed gauge colors.
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::hex(0x050505);
    pub const OUTER_RING: Color = Color::hex(0x404040);
    pub const INNER_RING: Color = Color::hex(0x373737);
    pub const WHITE: Color = Color::hex(0xffffff);
}

/// Window and presentation settings for [`crate::Speedometer`].
#[derive(Debug, Clone, Builder)]
pub struct SpeedometerConfig {
    #[builder(default = "Speedometer".to_string(), into)]
    pub title: String,

    // Window configuration
    #[builder(default = 800)]
    pub window_width: usize,
    #[builder(default = 600)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Font configuration
    #[builder(into)]
    pub font_path: Option<PathBuf>,
    #[builder(into)]
    pub serif_font_path: Option<PathBuf>,

    #[builder(default = true)]
    pub show_frame_counter: bool,
}

impl Default for SpeedometerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        assert_eq!(Color::hex(0x050505), Color::new(5, 5, 5));
        assert_eq!(Color::hex(0x404040).as_tuple(), (0x40, 0x40, 0x40));
        assert_eq!(Color::hex(0x12ab34), Color::new(0x12, 0xab, 0x34));
    }

    #[test]
    fn builder_defaults() {
        let config = SpeedometerConfig::default();
        assert_eq!(config.title, "Speedometer");
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, 600);
        assert_eq!(config.max_framerate, 60.0);
        assert!(config.font_path.is_none());
        assert!(config.serif_font_path.is_none());
        assert!(config.show_frame_counter);
    }

    #[test]
    fn builder_overrides() {
        let config = SpeedometerConfig::builder()
            .title("Cluster")
            .window_width(1024)
            .font_path("/tmp/face.ttf")
            .show_frame_counter(false)
            .build();
        assert_eq!(config.title, "Cluster");
        assert_eq!(config.window_width, 1024);
        assert_eq!(config.font_path, Some(PathBuf::from("/tmp/face.ttf")));
        assert!(!config.show_frame_counter);
    }
}
