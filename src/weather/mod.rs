//! Weather window detection over metocean series.
//!
//! Turns a sea-state time series and an operational limit condition into
//! the sorted list of intervals during which the sea work may proceed.
//!
//! # Usage
//!
//! ```
//! use u_logistics::models::{MetoceanSeries, Olc, WeatherWindow};
//! use u_logistics::weather::detect;
//!
//! let series = MetoceanSeries::hourly_hs(0.0, 1.0, vec![1.0, 2.0, 3.0, 1.0, 1.0, 4.0, 1.0, 1.0, 1.0]);
//! let windows = detect(&series, &Olc::unconstrained().with_hs(2.0)).unwrap();
//! assert_eq!(windows.windows[2], WeatherWindow::new(6.0, 3.0));
//! ```

mod detect;

pub use crate::models::{WeatherWindow, WeatherWindows};
pub use detect::{detect, permitted_steps};
