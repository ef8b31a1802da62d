//! Pure text helpers for the progress frame.

pub const SOLID: char = '━';
pub const HEAD: char = '╺';
pub const EMPTY: char = '━';

/// Cell counts of a rendered bar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BarLayout {
    pub filled: usize,
    pub head: usize,
    pub empty: usize,
}

/// Fraction of the track played, clamped to `0.0..=1.0`.
pub fn progress(position: f64, duration: f64) -> f64 {
    if duration <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    (position / duration).clamp(0.0, 1.0)
}

/// Whole percent, truncated.
pub fn percentage(progress: f64) -> u8 {
    (progress.clamp(0.0, 1.0) * 100.0).floor() as u8
}

pub fn bar_layout(progress: f64, width: usize) -> BarLayout {
    let filled = ((width as f64) * progress.clamp(0.0, 1.0)).floor() as usize;
    let filled = filled.min(width);
    let head = usize::from(filled < width);
    BarLayout {
        filled,
        head,
        empty: width - filled - head,
    }
}

/// `M:SS` under an hour, `H:MM:SS` otherwise. Fractions are dropped, never rounded up.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}
