//! Pure telemetry processing: status classification, the chart window,
//! and trend/baseline evaluation.

pub mod status;
pub mod trend;
pub mod window;

pub use status::{classify, Classification, StatusColor};
pub use trend::{Baseline, Trend, TrendTracker};
pub use window::TimeSeriesWindow;
