pub mod alarm;
pub mod coordinator;

pub use alarm::{AlarmSink, Muted, TerminalBell};
pub use coordinator::{AlarmCoordinator, AlertDecision, AlertPayload};
