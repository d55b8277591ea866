//! Metocean time series.
//!
//! A uniformly stepped table of sea-state observations. Wave height and
//! wind speed are mandatory channels; peak period and current speed are
//! optional.
//!
//! # Time Model
//! Timestamps are hours relative to the project epoch, the same epoch as
//! `PlannerConfig::project_start`. The step is inferred from the first two
//! timestamps; the series is assumed uniform after that.

use serde::{Deserialize, Serialize};

/// Sea-state channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    /// Significant wave height.
    Hs,
    /// Peak wave period.
    Tp,
    /// Wind speed.
    Ws,
    /// Current speed.
    Cs,
}

impl Channel {
    /// Short name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hs => "Hs",
            Self::Tp => "Tp",
            Self::Ws => "Ws",
            Self::Cs => "Cs",
        }
    }
}

/// A metocean observation series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetoceanSeries {
    /// Timestamps (hours).
    pub time: Vec<f64>,
    /// Significant wave height (m).
    pub hs: Vec<f64>,
    /// Wind speed (m/s).
    pub ws: Vec<f64>,
    /// Peak period (s).
    #[serde(default)]
    pub tp: Option<Vec<f64>>,
    /// Current speed (m/s).
    #[serde(default)]
    pub cs: Option<Vec<f64>>,
}

impl MetoceanSeries {
    /// Creates a series from the mandatory channels.
    pub fn new(time: Vec<f64>, hs: Vec<f64>, ws: Vec<f64>) -> Self {
        Self {
            time,
            hs,
            ws,
            tp: None,
            cs: None,
        }
    }

    /// Builds a series at a fixed step starting at `t0`, with wind speed
    /// held at zero. Convenient for wave-only studies.
    pub fn hourly_hs(t0: f64, step: f64, hs: Vec<f64>) -> Self {
        let time = (0..hs.len()).map(|i| t0 + i as f64 * step).collect();
        let ws = vec![0.0; hs.len()];
        Self::new(time, hs, ws)
    }

    /// Adds the peak period channel.
    pub fn with_tp(mut self, tp: Vec<f64>) -> Self {
        self.tp = Some(tp);
        self
    }

    /// Adds the current speed channel.
    pub fn with_cs(mut self, cs: Vec<f64>) -> Self {
        self.cs = Some(cs);
        self
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Time step, inferred from the first two timestamps.
    ///
    /// `None` with fewer than two samples or a non-positive step.
    pub fn step(&self) -> Option<f64> {
        match self.time.as_slice() {
            [t0, t1, ..] if t1 - t0 > 0.0 => Some(t1 - t0),
            _ => None,
        }
    }

    /// Samples of a channel, if present.
    pub fn channel(&self, channel: Channel) -> Option<&[f64]> {
        match channel {
            Channel::Hs => Some(&self.hs),
            Channel::Ws => Some(&self.ws),
            Channel::Tp => self.tp.as_deref(),
            Channel::Cs => self.cs.as_deref(),
        }
    }

    /// Channels whose length differs from the time axis.
    pub fn misaligned_channels(&self) -> Vec<Channel> {
        [Channel::Hs, Channel::Ws, Channel::Tp, Channel::Cs]
            .into_iter()
            .filter(|&c| {
                self.channel(c)
                    .is_some_and(|samples| samples.len() != self.time.len())
            })
            .collect()
    }
}
