// ============================================================================
// SPEEDOMETER GAUGE
// ============================================================================
//
// Every frame is composed from scratch from the surface size and the frame
// counter; nothing about the layout is cached between frames.

use crate::animation::{needle_angle, zero_pad};
use crate::config::{palette, Color};
use crate::geometry::{polar, Position, Surface};
use crate::scene::{DrawCommand, Scene, TextAlign, TextBaseline, TextStyle, Typeface};
use std::f64::consts::PI;

pub const ANGLE_FROM: f64 = -1.25 * PI;
pub const ANGLE_TO: f64 = 0.25 * PI;

/// Large ticks on the dial, one per labelled value.
pub const LARGE_TICK_COUNT: usize = 9;
/// Value step between adjacent large-tick labels.
pub const LABEL_STEP: usize = 20;

const COUNTER_DIGITS: usize = 5;

/// Label for the large tick at `index`.
pub fn label_text(index: usize) -> String {
    (index * LABEL_STEP).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub color: Color,
    pub size: f64,
}

/// A radial tick mark with a background-colored halo around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStyle {
    pub color: Color,
    pub line_width: f64,
    pub length: f64,
    pub margin: Margin,
}

/// Paints a ring whose outer edge sits at `radius`.
pub fn ring(
    scene: &mut Scene,
    color: Color,
    line_width: f64,
    center: Position,
    radius: f64,
    angle_from: f64,
    angle_to: f64,
) {
    scene.add_command(DrawCommand::StrokeArc {
        center,
        radius: radius - line_width / 2.0,
        line_width,
        start_angle: angle_from,
        end_angle: angle_to,
        color,
    });
}

/// Paints a tick running inward from `radius` at `angle`: first the margin
/// halo, then the tick itself.
pub fn tick(scene: &mut Scene, style: &TickStyle, center: Position, radius: f64, angle: f64) {
    let margin = style.margin.size;
    scene.add_command(DrawCommand::StrokeLine {
        from: polar(center, radius + margin, angle),
        to: polar(center, radius - style.length - margin, angle),
        line_width: style.line_width + margin * 2.0,
        color: style.margin.color,
    });
    scene.add_command(DrawCommand::StrokeLine {
        from: polar(center, radius, angle),
        to: polar(center, radius - style.length, angle),
        line_width: style.line_width,
        color: style.color,
    });
}

/// Angles of `count` evenly spaced ticks across the dial, each shifted by
/// `offset` steps from the start.
fn tick_angles(count: usize, step_divisor: f64, offset: f64) -> impl Iterator<Item = f64> {
    let step = (ANGLE_TO - ANGLE_FROM) / step_divisor;
    (0..count).map(move |i| ANGLE_FROM + (i as f64 + offset) * step)
}

/// Layout derived from the surface for a single frame.
struct Layout {
    center: Position,
    radius: f64,
    outer_ring_width: f64,
    large: TickStyle,
    small: TickStyle,
    small_radius: f64,
    tiny: TickStyle,
    tiny_count: usize,
    inner_ring_width: f64,
    inner_ring_radius: f64,
    inner_tick: TickStyle,
    inner_tick_count: usize,
    label_radius: f64,
    unit_label: Position,
    gear_label: Position,
    needle: TickStyle,
}

impl Layout {
    fn new(surface: &Surface) -> Self {
        let rel = |f: f64| surface.rel_min(f);
        let background = palette::BACKGROUND;

        let center = surface.pos(0.5, 0.5);
        let radius = rel(0.3);
        let outer_ring_width = rel(0.02);

        let large = TickStyle {
            color: palette::WHITE,
            line_width: rel(0.0065),
            length: rel(0.04),
            margin: Margin {
                color: background,
                size: rel(0.00325),
            },
        };
        let small = TickStyle {
            color: palette::WHITE,
            line_width: rel(0.005),
            length: rel(0.024),
            margin: Margin {
                color: background,
                size: rel(0.00325),
            },
        };
        let small_radius = radius - outer_ring_width / 2.0;
        let small_count = LARGE_TICK_COUNT - 1;
        let tiny = TickStyle {
            color: palette::WHITE,
            line_width: rel(0.003),
            length: rel(0.013),
            margin: Margin {
                color: background,
                size: rel(0.0025),
            },
        };
        let tiny_count = small_count * 2;

        let inner_ring_width = rel(0.003);
        let inner_tick = TickStyle {
            color: palette::INNER_RING,
            line_width: inner_ring_width,
            length: rel(0.017),
            margin: Margin {
                color: background,
                size: rel(0.0025),
            },
        };

        let needle_length = radius - outer_ring_width / 2.0;
        let needle = TickStyle {
            color: palette::WHITE,
            line_width: rel(0.003),
            length: needle_length,
            margin: Margin {
                color: background,
                size: rel(0.00325),
            },
        };

        Self {
            center,
            radius,
            outer_ring_width,
            large,
            small,
            small_radius,
            tiny,
            tiny_count,
            inner_ring_width,
            inner_ring_radius: radius - rel(0.027),
            inner_tick,
            inner_tick_count: tiny_count * 2,
            label_radius: radius - rel(0.077),
            unit_label: polar(center, radius - rel(0.104), -0.5 * PI),
            gear_label: polar(center, radius - rel(0.12), 0.5 * PI),
            needle,
        }
    }
}

/// Composes the complete gauge for `frame` on `surface`. Text sizes are
/// logical pixels, scaled by `surface.scale`.
///
/// Pure: identical inputs yield identical scenes.
pub fn compose(surface: &Surface, frame: u64, show_frame_counter: bool) -> Scene {
    let layout = Layout::new(surface);
    let mut scene = Scene::new();

    scene.add_command(DrawCommand::FillRect {
        origin: Position::default(),
        width: surface.width,
        height: surface.height,
        color: palette::BACKGROUND,
    });

    if show_frame_counter {
        scene.add_command(DrawCommand::FillText {
            position: surface.pos(0.0, 0.0),
            text: zero_pad(frame, COUNTER_DIGITS),
            style: TextStyle {
                typeface: Typeface::Serif,
                size: surface.text_px(48.0),
                letter_spacing: 0.0,
                align: TextAlign::Left,
                baseline: TextBaseline::Top,
                color: palette::WHITE,
            },
        });
    }

    ring(
        &mut scene,
        palette::OUTER_RING,
        layout.outer_ring_width,
        layout.center,
        layout.radius,
        ANGLE_FROM,
        ANGLE_TO,
    );

    // Inner ring ticks stand on the ring and point outward.
    let inner_tick_radius = layout.inner_ring_radius + layout.inner_tick.length;
    let inner_count = layout.inner_tick_count;
    for angle in tick_angles(inner_count, inner_count as f64, 0.5) {
        tick(&mut scene, &layout.inner_tick, layout.center, inner_tick_radius, angle);
    }
    ring(
        &mut scene,
        palette::INNER_RING,
        layout.inner_ring_width,
        layout.center,
        layout.inner_ring_radius,
        ANGLE_FROM,
        ANGLE_TO,
    );

    let large_steps = (LARGE_TICK_COUNT - 1) as f64;
    for angle in tick_angles(LARGE_TICK_COUNT, large_steps, 0.0) {
        tick(&mut scene, &layout.large, layout.center, layout.radius, angle);
    }
    let small_count = LARGE_TICK_COUNT - 1;
    for angle in tick_angles(small_count, small_count as f64, 0.5) {
        tick(&mut scene, &layout.small, layout.center, layout.small_radius, angle);
    }
    for angle in tick_angles(layout.tiny_count, layout.tiny_count as f64, 0.5) {
        tick(&mut scene, &layout.tiny, layout.center, layout.small_radius, angle);
    }

    let label_style = TextStyle {
        letter_spacing: surface.text_px(-3.0),
        ..TextStyle::centered(surface.text_px(48.0), palette::WHITE)
    };
    for (index, angle) in tick_angles(LARGE_TICK_COUNT, large_steps, 0.0).enumerate() {
        scene.add_command(DrawCommand::FillText {
            position: polar(layout.center, layout.label_radius, angle),
            text: label_text(index),
            style: label_style,
        });
    }

    scene.add_command(DrawCommand::FillText {
        position: layout.unit_label,
        text: "mph".to_string(),
        style: TextStyle::centered(surface.text_px(24.0), palette::WHITE),
    });
    scene.add_command(DrawCommand::FillText {
        position: layout.gear_label,
        text: "P".to_string(),
        style: TextStyle::centered(surface.text_px(60.0), palette::WHITE),
    });

    let needle_length = layout.needle.length;
    tick(
        &mut scene,
        &layout.needle,
        layout.center,
        needle_length,
        needle_angle(frame, ANGLE_FROM, ANGLE_TO),
    );

    scene
}

/// Stateful renderer: owns the frame counter and composes one scene per call.
#[derive(Debug, Clone)]
pub struct GaugeRenderer {
    frames: u64,
    show_frame_counter: bool,
}

impl Default for GaugeRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl GaugeRenderer {
    pub fn new(show_frame_counter: bool) -> Self {
        Self {
            frames: 0,
            show_frame_counter,
        }
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advances the counter by one and composes that frame.
    pub fn draw(&mut self, surface: &Surface) -> Scene {
        self.frames = self.frames.wrapping_add(1);
        compose(surface, self.frames, self.show_frame_counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stroke_lines(scene: &Scene) -> Vec<(Position, Position, f64, Color)> {
        scene
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::StrokeLine {
                    from,
                    to,
                    line_width,
                    color,
                } => Some((*from, *to, *line_width, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn label_values_step_by_twenty() {
        let labels: Vec<String> = (0..LARGE_TICK_COUNT).map(label_text).collect();
        assert_eq!(
            labels,
            ["0", "20", "40", "60", "80", "100", "120", "140", "160"]
        );
    }

    #[test]
    fn tick_counts_are_exact() {
        assert_eq!(tick_angles(9, 8.0, 0.0).count(), 9);
        let angles: Vec<f64> = tick_angles(9, 8.0, 0.0).collect();
        assert_eq!(angles[0], ANGLE_FROM);
        assert!((angles[8] - ANGLE_TO).abs() < 1e-12);

        let offset: Vec<f64> = tick_angles(8, 8.0, 0.5).collect();
        assert!(offset.iter().all(|a| *a > ANGLE_FROM && *a < ANGLE_TO));
    }

    #[test]
    fn tick_paints_margin_then_mark() {
        let mut scene = Scene::new();
        let style = TickStyle {
            color: palette::WHITE,
            line_width: 2.0,
            length: 10.0,
            margin: Margin {
                color: palette::BACKGROUND,
                size: 1.0,
            },
        };
        tick(&mut scene, &style, Position::new(0.0, 0.0), 50.0, 0.0);

        let lines = stroke_lines(&scene);
        assert_eq!(lines.len(), 2);
        let (from, to, width, color) = lines[0];
        assert!((from.x - 51.0).abs() < 1e-9);
        assert!((to.x - 39.0).abs() < 1e-9);
        assert_eq!(width, 4.0);
        assert_eq!(color, palette::BACKGROUND);

        let (from, to, width, color) = lines[1];
        assert!((from.x - 50.0).abs() < 1e-9);
        assert!((to.x - 40.0).abs() < 1e-9);
        assert_eq!(width, 2.0);
        assert_eq!(color, palette::WHITE);
    }

    #[test]
    fn ring_outer_edge_sits_on_radius() {
        let mut scene = Scene::new();
        ring(
            &mut scene,
            palette::OUTER_RING,
            8.0,
            Position::new(1.0, 2.0),
            100.0,
            ANGLE_FROM,
            ANGLE_TO,
        );
        assert_eq!(
            scene.commands(),
            [DrawCommand::StrokeArc {
                center: Position::new(1.0, 2.0),
                radius: 96.0,
                line_width: 8.0,
                start_angle: ANGLE_FROM,
                end_angle: ANGLE_TO,
                color: palette::OUTER_RING,
            }]
        );
    }

    #[test]
    fn renderer_counts_frames() {
        let surface = Surface::new(640.0, 480.0);
        let mut renderer = GaugeRenderer::default();
        assert_eq!(renderer.frames(), 0);
        renderer.draw(&surface);
        renderer.draw(&surface);
        assert_eq!(renderer.frames(), 2);
    }

    #[test]
    fn draw_matches_compose_for_current_frame() {
        let surface = Surface::new(640.0, 480.0);
        let mut renderer = GaugeRenderer::new(true);
        let scene = renderer.draw(&surface);
        assert_eq!(scene, compose(&surface, 1, true));
    }

    #[test]
    fn needle_starts_near_dial_start() {
        let surface = Surface::new(500.0, 500.0);
        let scene = compose(&surface, 0, false);
        let (from, to, _, color) = *stroke_lines(&scene).last().unwrap();
        assert_eq!(color, palette::WHITE);
        // Needle runs from its tip back to the center.
        assert!((to.x - 250.0).abs() < 1e-9 && (to.y - 250.0).abs() < 1e-9);
        let tip = polar(Position::new(250.0, 250.0), 150.0 - 5.0, ANGLE_FROM);
        assert!((from.x - tip.x).abs() < 1e-9 && (from.y - tip.y).abs() < 1e-9);
    }

    #[test]
    fn text_follows_scale_factor_but_geometry_does_not() {
        let physical = Surface::new(1600.0, 1200.0);
        let plain = compose(&physical, 10, true);
        let hidpi = compose(&physical.with_scale(2.0), 10, true);
        assert_eq!(plain.len(), hidpi.len());

        let mut sizes = Vec::new();
        for (a, b) in plain.commands().iter().zip(hidpi.commands()) {
            match (a, b) {
                (
                    DrawCommand::FillText { style: sa, .. },
                    DrawCommand::FillText { style: sb, .. },
                ) => {
                    assert_eq!(sb.size, sa.size * 2.0);
                    assert_eq!(sb.letter_spacing, sa.letter_spacing * 2.0);
                    sizes.push(sb.size);
                }
                _ => assert_eq!(a, b),
            }
        }
        // counter, 9 labels, unit, gear
        assert_eq!(sizes.len(), 12);
        assert_eq!(sizes[0], 96.0);
        assert_eq!(sizes[1], 96.0);
        assert_eq!(sizes[10], 48.0);
        assert_eq!(sizes[11], 120.0);
    }

    proptest! {
        #[test]
        fn prop_compose_is_deterministic(w in 1.0f64..4000.0, h in 1.0f64..4000.0, frame in 0u64..100_000) {
            let surface = Surface::new(w, h);
            prop_assert_eq!(compose(&surface, frame, true), compose(&surface, frame, true));
        }

        #[test]
        fn prop_scene_size_is_fixed(w in 1.0f64..4000.0, h in 1.0f64..4000.0, frame in 0u64..100_000) {
            let surface = Surface::new(w, h);
            // background + counter + 2 rings + (32 + 9 + 8 + 16 + 1) ticks * 2 + 9 labels + 2 indicators
            prop_assert_eq!(compose(&surface, frame, true).len(), 1 + 1 + 2 + 66 * 2 + 9 + 2);
            prop_assert_eq!(compose(&surface, frame, false).len(), 1 + 2 + 66 * 2 + 9 + 2);
        }
    }
}
