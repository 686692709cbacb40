// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::config::Color;
use crate::geometry::Position;
use crate::raster::{Canvas, Fonts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Typeface {
    /// Dial face used for labels and indicators.
    Display,
    /// Plain serif used by the frame counter overlay.
    Serif,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    /// Ascent line sits on the anchor.
    Top,
    /// Em box is vertically centered on the anchor.
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub typeface: Typeface,
    pub size: f32,
    /// Extra advance added after every glyph, in pixels. Negative tightens.
    pub letter_spacing: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub color: Color,
}

impl TextStyle {
    /// Centered display-face text with no extra spacing.
    pub const fn centered(size: f32, color: Color) -> Self {
        Self {
            typeface: Typeface::Display,
            size,
            letter_spacing: 0.0,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        origin: Position,
        width: f64,
        height: f64,
        color: Color,
    },
    /// Stroke centered on `radius`, swept clockwise from `start_angle` to `end_angle`.
    StrokeArc {
        center: Position,
        radius: f64,
        line_width: f64,
        start_angle: f64,
        end_angle: f64,
        color: Color,
    },
    /// Straight stroke with butt caps.
    StrokeLine {
        from: Position,
        to: Position,
        line_width: f64,
        color: Color,
    },
    FillText {
        position: Position,
        text: String,
        style: TextStyle,
    },
}

/// One frame's worth of paint commands, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn render(&self, canvas: &mut Canvas, fonts: &Fonts) {
        for command in &self.commands {
            match command {
                DrawCommand::FillRect {
                    origin,
                    width,
                    height,
                    color,
                } => {
                    canvas.fill_rect(*origin, *width, *height, *color);
                }
                DrawCommand::StrokeArc {
                    center,
                    radius,
                    line_width,
                    start_angle,
                    end_angle,
                    color,
                } => {
                    canvas.stroke_arc(
                        *center,
                        *radius,
                        *line_width,
                        *start_angle,
                        *end_angle,
                        *color,
                    );
                }
                DrawCommand::StrokeLine {
                    from,
                    to,
                    line_width,
                    color,
                } => {
                    canvas.stroke_line(*from, *to, *line_width, *color);
                }
                DrawCommand::FillText {
                    position,
                    text,
                    style,
                } => {
                    if let Some(font) = fonts.get(style.typeface) {
                        canvas.fill_text(font, *position, text, style);
                    }
                }
            }
        }
    }
}
