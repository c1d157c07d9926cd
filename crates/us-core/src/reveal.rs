//! Paging and centring arithmetic for text reveal.
//!
//! Rounding is half-to-even throughout, so a line of odd width in an
//! even-width viewport lands on the even column (`37.5` becomes `38`,
//! `2.5` becomes `2`).

use std::ops::Range;
use std::time::Duration;

use unicode_width::UnicodeWidthStr;

/// Lines repeated at the top of a page from the bottom of the previous one.
pub const PAGE_OVERLAP: usize = 5;

/// Whether a reveal still waits between lines.
///
/// Once a reveal switches to [`Pacing::FastForward`] it stays there for the
/// rest of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Wait this long after each non-blank line.
    Paced(Duration),
    /// Draw without waiting.
    FastForward,
}

impl Pacing {
    /// Pacing for a line delay; a zero delay means fast-forward.
    pub fn from_delay(delay: Duration) -> Self {
        if delay.is_zero() {
            Self::FastForward
        } else {
            Self::Paced(delay)
        }
    }

    /// The delay to wait after a line.
    pub fn delay(self) -> Duration {
        match self {
            Self::Paced(delay) => delay,
            Self::FastForward => Duration::ZERO,
        }
    }

    /// Whether pacing has been given up.
    pub fn is_fast_forward(self) -> bool {
        matches!(self, Self::FastForward)
    }
}

/// Column at which `line` starts when centred in a viewport `viewport_width` wide.
///
/// Lines wider than the viewport start at column 0.
pub fn centred_column(viewport_width: u16, line: &str) -> u16 {
    let line_width = line.width() as f64;
    let column = (f64::from(viewport_width) / 2.0 - line_width / 2.0).round_ties_even();
    if column <= 0.0 { 0 } else { column as u16 }
}

/// First row of a block of `line_count` lines centred vertically.
///
/// Negative for blocks taller than the viewport; callers clamp.
pub fn centred_start_row(viewport_height: u16, line_count: usize) -> i64 {
    let middle = (f64::from(viewport_height) / 2.0).round_ties_even() as i64;
    let half_block = (line_count as f64 / 2.0).round_ties_even() as i64;
    middle - half_block
}

/// Split `line_count` lines into pages of at most `max_lines` lines.
///
/// Each page after the first starts [`PAGE_OVERLAP`] lines before the end of
/// the previous one. When a page is too short to overlap that much, the next
/// page still advances by one line, so the result is always finite. There is
/// always at least one page, possibly empty.
pub fn paginate(line_count: usize, max_lines: usize) -> Vec<Range<usize>> {
    let max_lines = max_lines.max(1);
    let step = max_lines.saturating_sub(PAGE_OVERLAP).max(1);

    let mut pages = Vec::new();
    let mut start = 0;
    while line_count - start > max_lines {
        pages.push(start..start + max_lines);
        start += step;
    }
    pages.push(start..line_count);
    pages
}
