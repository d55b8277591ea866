//! Weather window models.
//!
//! A weather window is a maximal contiguous interval during which the
//! sea state stays within an operational limit condition.
//!
//! # Time Model
//! Offsets and durations are in the same unit as the metocean series'
//! timestamps (hours). Windows are half-open: `[start, start + duration)`.
//!
//! # Invariant
//! Windows in a [`WeatherWindows`] are non-overlapping and sorted by
//! `start`.

use serde::{Deserialize, Serialize};

/// A single permitted interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherWindow {
    /// Interval start.
    pub start: f64,
    /// Interval length.
    pub duration: f64,
}

impl WeatherWindow {
    /// Creates a window.
    pub fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    /// Interval end (exclusive).
    #[inline]
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Whether `time` falls within this window.
    #[inline]
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end()
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// The ordered list of weather windows found in a series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherWindows {
    /// Series step the windows were built at.
    pub step: f64,
    /// Windows, sorted by start.
    pub windows: Vec<WeatherWindow>,
}

impl WeatherWindows {
    /// Creates an empty list at the given step.
    pub fn empty(step: f64) -> Self {
        Self {
            step,
            windows: Vec::new(),
        }
    }

    /// Creates a list from windows already sorted and disjoint.
    pub fn from_sorted(step: f64, windows: Vec<WeatherWindow>) -> Self {
        debug_assert!(windows.windows(2).all(|w| w[0].end() <= w[1].start));
        Self { step, windows }
    }

    /// Number of windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no window exists.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Iterates windows in start order.
    pub fn iter(&self) -> std::slice::Iter<'_, WeatherWindow> {
        self.windows.iter()
    }

    /// Sum of all window durations.
    pub fn total_duration(&self) -> f64 {
        self.windows.iter().map(|w| w.duration).sum()
    }

    /// Longest window, if any.
    pub fn longest(&self) -> Option<&WeatherWindow> {
        self.windows
            .iter()
            .max_by(|a, b| a.duration.total_cmp(&b.duration))
    }

    /// Earliest window with `start >= not_before` and
    /// `duration >= min_duration`.
    ///
    /// Windows starting before `not_before` are never chosen, even when
    /// their tail would be long enough.
    pub fn first_fit(&self, not_before: f64, min_duration: f64) -> Option<&WeatherWindow> {
        let first = self.windows.partition_point(|w| w.start < not_before);
        self.windows[first..]
            .iter()
            .find(|w| w.duration >= min_duration)
    }
}

impl<'a> IntoIterator for &'a WeatherWindows {
    type Item = &'a WeatherWindow;
    type IntoIter = std::slice::Iter<'a, WeatherWindow>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WeatherWindows {
        WeatherWindows::from_sorted(
            1.0,
            vec![
                WeatherWindow::new(0.0, 2.0),
                WeatherWindow::new(3.0, 2.0),
                WeatherWindow::new(6.0, 3.0),
            ],
        )
    }

    #[test]
    fn test_window_bounds() {
        let w = WeatherWindow::new(3.0, 2.0);
        assert_eq!(w.end(), 5.0);
        assert!(w.contains(3.0));
        assert!(w.contains(4.5));
        assert!(!w.contains(5.0)); // exclusive end
        assert!(!w.overlaps(&WeatherWindow::new(5.0, 1.0)));
        assert!(w.overlaps(&WeatherWindow::new(4.0, 1.0)));
    }

    #[test]
    fn test_first_fit_start_and_duration() {
        let ww = sample();
        // start >= 5 and duration >= 3 → (6, 3)
        assert_eq!(ww.first_fit(5.0, 3.0), Some(&WeatherWindow::new(6.0, 3.0)));
        // start >= 0, duration >= 2 → first window
        assert_eq!(ww.first_fit(0.0, 2.0), Some(&WeatherWindow::new(0.0, 2.0)));
        // start exactly on a window start is allowed
        assert_eq!(ww.first_fit(3.0, 1.0), Some(&WeatherWindow::new(3.0, 2.0)));
    }

    #[test]
    fn test_first_fit_none() {
        let ww = sample();
        assert_eq!(ww.first_fit(7.0, 1.0), None);
        assert_eq!(ww.first_fit(0.0, 4.0), None);
        assert_eq!(WeatherWindows::empty(1.0).first_fit(0.0, 0.0), None);
    }

    #[test]
    fn test_totals() {
        let ww = sample();
        assert_eq!(ww.len(), 3);
        assert!((ww.total_duration() - 7.0).abs() < 1e-12);
        assert_eq!(ww.longest(), Some(&WeatherWindow::new(6.0, 3.0)));
    }
}
