use core::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// How a square neighborhood that reaches past the raster edge is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Truncate the window to the raster; edge pixels see a smaller
    /// neighborhood.
    #[default]
    Clamp,
    /// Reject windows that leave the raster.
    Skip,
}

/// Index range covered by a window of half-size `radius` around `center`
/// along an axis of length `len`.
///
/// Returns `None` for an empty axis, for `center >= len`, and under
/// [`BorderMode::Skip`] when the window does not fit.
pub fn window(
    center: usize,
    radius: usize,
    len: usize,
    mode: BorderMode,
) -> Option<RangeInclusive<usize>> {
    if center >= len {
        return None;
    }

    let last = len - 1;
    match mode {
        BorderMode::Clamp => {
            let lo = center.saturating_sub(radius);
            let hi = center.saturating_add(radius).min(last);
            Some(lo..=hi)
        }
        BorderMode::Skip => {
            let lo = center.checked_sub(radius)?;
            let hi = center.checked_add(radius)?;
            (hi <= last).then_some(lo..=hi)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, window};

    #[test]
    fn clamp_truncates_at_both_ends() {
        assert_eq!(window(0, 2, 10, BorderMode::Clamp), Some(0..=2));
        assert_eq!(window(1, 2, 10, BorderMode::Clamp), Some(0..=3));
        assert_eq!(window(5, 2, 10, BorderMode::Clamp), Some(3..=7));
        assert_eq!(window(9, 2, 10, BorderMode::Clamp), Some(7..=9));
        assert_eq!(window(0, 3, 1, BorderMode::Clamp), Some(0..=0));
    }

    #[test]
    fn skip_rejects_windows_that_leave_the_axis() {
        assert_eq!(window(1, 2, 10, BorderMode::Skip), None);
        assert_eq!(window(2, 2, 10, BorderMode::Skip), Some(0..=4));
        assert_eq!(window(7, 2, 10, BorderMode::Skip), Some(5..=9));
        assert_eq!(window(8, 2, 10, BorderMode::Skip), None);
    }

    #[test]
    fn out_of_axis_center_has_no_window() {
        assert_eq!(window(10, 1, 10, BorderMode::Clamp), None);
        assert_eq!(window(0, 0, 0, BorderMode::Clamp), None);
        assert_eq!(window(3, 0, 10, BorderMode::Skip), Some(3..=3));
    }
}
