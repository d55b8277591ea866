//! Weather window detection.
//!
//! # Algorithm
//! 1. A step is permitted when every channel the OLC constrains is within
//!    its limit at that step (`value <= limit`). NaN is never within.
//! 2. Maximal runs of permitted steps are run-length encoded in one pass:
//!    `start = t0 + first_index * step`, `duration = run_length * step`.
//!
//! An unconstrained OLC permits every step.
//!
//! # Complexity
//! O(n × channels) for n samples.

use tracing::{debug, warn};

use crate::error::PlanningError;
use crate::models::{MetoceanSeries, Olc, WeatherWindow, WeatherWindows};

/// Per-step permission vector for `olc` over `series`.
///
/// # Errors
/// `PlanningError::MalformedInput` when a constrained channel is absent
/// from the series or its length differs from the time axis.
pub fn permitted_steps(series: &MetoceanSeries, olc: &Olc) -> Result<Vec<bool>, PlanningError> {
    let n = series.len();
    let mut permitted = vec![true; n];

    for (channel, limit) in olc.constraints() {
        let samples = series.channel(channel).ok_or_else(|| {
            PlanningError::MalformedInput(format!(
                "OLC constrains {} but the metocean series has no such channel",
                channel.name()
            ))
        })?;
        if samples.len() != n {
            return Err(PlanningError::MalformedInput(format!(
                "metocean channel {} has {} samples, time axis has {}",
                channel.name(),
                samples.len(),
                n
            )));
        }
        for (ok, &value) in permitted.iter_mut().zip(samples) {
            *ok = *ok && value <= limit;
        }
    }
    Ok(permitted)
}

/// Detects the weather windows of `series` under `olc`.
///
/// An empty result is the "no weather window" signal, not an error.
///
/// # Errors
/// `PlanningError::MalformedInput` when the step cannot be inferred (fewer
/// than two samples or non-increasing first step), or as for
/// [`permitted_steps`].
pub fn detect(series: &MetoceanSeries, olc: &Olc) -> Result<WeatherWindows, PlanningError> {
    let step = series.step().ok_or_else(|| {
        PlanningError::MalformedInput(
            "metocean series needs at least two increasing timestamps".into(),
        )
    })?;
    let permitted = permitted_steps(series, olc)?;
    let t0 = series.time[0];

    let mut windows = Vec::new();
    let mut run_start: Option<usize> = None;
    for (i, &ok) in permitted.iter().enumerate() {
        match (ok, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(first)) => {
                windows.push(run(t0, step, first, i));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(first) = run_start {
        windows.push(run(t0, step, first, permitted.len()));
    }

    if windows.is_empty() {
        warn!(samples = permitted.len(), ?olc, "no weather window");
    } else {
        debug!(
            samples = permitted.len(),
            windows = windows.len(),
            ?olc,
            "weather windows detected"
        );
    }
    Ok(WeatherWindows::from_sorted(step, windows))
}

fn run(t0: f64, step: f64, first: usize, end: usize) -> WeatherWindow {
    WeatherWindow::new(t0 + first as f64 * step, (end - first) as f64 * step)
}
