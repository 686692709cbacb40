// ============================================================================
// NEEDLE ANIMATION
// ============================================================================

/// Length of one full forward-and-back needle sweep (5 s at 60 fps).
pub const NEEDLE_PERIOD_FRAMES: u64 = 60 * 5;

/// Which half of the sweep a phase falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Forward,
    Backward,
}

impl SweepDirection {
    pub fn at(phase: f64) -> Self {
        if phase < 0.5 {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

/// Fractional position of `frame` within the sweep period, in `0..1`.
pub fn phase(frame: u64) -> f64 {
    (frame % NEEDLE_PERIOD_FRAMES) as f64 / NEEDLE_PERIOD_FRAMES as f64
}

/// Triangular wave: rises 0 -> 1 over the first half, falls back over the second.
pub fn sweep_progress(phase: f64) -> f64 {
    match SweepDirection::at(phase) {
        SweepDirection::Forward => phase * 2.0,
        SweepDirection::Backward => (1.0 - phase) * 2.0,
    }
}

// https://easings.net/#easeInOutQuint
pub fn ease_in_out_quint(x: f64) -> f64 {
    if x < 0.5 {
        16.0 * x * x * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(5) / 2.0
    }
}

/// Needle angle for `frame`, interpolated between the dial's end angles.
pub fn needle_angle(frame: u64, angle_from: f64, angle_to: f64) -> f64 {
    let progress = ease_in_out_quint(sweep_progress(phase(frame)));
    angle_from + progress * (angle_to - angle_from)
}

/// Decimal `n` left-padded with zeros to `len` characters. Wider numbers keep
/// only their last `len` digits.
pub fn zero_pad(n: u64, len: usize) -> String {
    let digits = format!("{n:0>len$}");
    digits[digits.len() - len..].to_string()
}
