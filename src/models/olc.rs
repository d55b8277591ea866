//! Operational limit conditions.
//!
//! An OLC is the maximum sea-state severity under which a marine
//! operation may proceed. Each component is optional; `None` means the
//! operation is not constrained on that channel.

use serde::{Deserialize, Serialize};

use super::Channel;

/// Operational limit condition.
///
/// | Field | Channel | Unit |
/// |-------|---------|------|
/// | `max_hs` | significant wave height | m |
/// | `max_tp` | peak wave period | s |
/// | `max_ws` | wind speed | m/s |
/// | `max_cs` | current speed | m/s |
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Olc {
    /// Maximum significant wave height.
    pub max_hs: Option<f64>,
    /// Maximum peak period.
    pub max_tp: Option<f64>,
    /// Maximum wind speed.
    pub max_ws: Option<f64>,
    /// Maximum current speed.
    pub max_cs: Option<f64>,
}

impl Olc {
    /// An OLC that constrains nothing.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Sets the wave height limit.
    pub fn with_hs(mut self, max: f64) -> Self {
        self.max_hs = Some(max);
        self
    }

    /// Sets the peak period limit.
    pub fn with_tp(mut self, max: f64) -> Self {
        self.max_tp = Some(max);
        self
    }

    /// Sets the wind speed limit.
    pub fn with_ws(mut self, max: f64) -> Self {
        self.max_ws = Some(max);
        self
    }

    /// Sets the current speed limit.
    pub fn with_cs(mut self, max: f64) -> Self {
        self.max_cs = Some(max);
        self
    }

    /// Whether no component is set.
    pub fn is_unconstrained(&self) -> bool {
        self.max_hs.is_none()
            && self.max_tp.is_none()
            && self.max_ws.is_none()
            && self.max_cs.is_none()
    }

    /// Limit on one channel.
    pub fn limit(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::Hs => self.max_hs,
            Channel::Tp => self.max_tp,
            Channel::Ws => self.max_ws,
            Channel::Cs => self.max_cs,
        }
    }

    /// Constrained channels with their limits, in `Hs, Tp, Ws, Cs` order.
    pub fn constraints(&self) -> impl Iterator<Item = (Channel, f64)> + '_ {
        [Channel::Hs, Channel::Tp, Channel::Ws, Channel::Cs]
            .into_iter()
            .filter_map(|c| self.limit(c).map(|max| (c, max)))
    }

    /// Component-wise most restrictive combination of two OLCs.
    ///
    /// A component set on only one side is kept; set on both, the lower
    /// limit wins.
    pub fn tightest(&self, other: &Self) -> Self {
        Self {
            max_hs: min_limit(self.max_hs, other.max_hs),
            max_tp: min_limit(self.max_tp, other.max_tp),
            max_ws: min_limit(self.max_ws, other.max_ws),
            max_cs: min_limit(self.max_cs, other.max_cs),
        }
    }

    /// Folds [`Olc::tightest`] over a sequence. Empty input is unconstrained.
    pub fn tightest_of<'a, I>(olcs: I) -> Self
    where
        I: IntoIterator<Item = &'a Olc>,
    {
        olcs.into_iter()
            .fold(Self::unconstrained(), |acc, o| acc.tightest(o))
    }
}

fn min_limit(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}
