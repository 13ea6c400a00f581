pub mod client;
pub mod poller;

pub use client::{ClientError, MonitorClient};
pub use poller::{spawn_poller, PollEvent};
