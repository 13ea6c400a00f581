mod remediation;
mod telemetry;

pub use remediation::*;
pub use telemetry::*;
