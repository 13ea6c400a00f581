//! Audible alarm: a fixed three-tone pattern driven by explicit instants.
//!
//! The UI loop polls the running [`AlarmSequence`] every frame and forwards
//! due tones to an [`AlarmSink`]. The sequence is finished once the last
//! tone has ended.

use std::io::Write;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::constants::{ALARM_PATTERN_HZ, ALARM_TONE_MS, ALARM_TONE_SPACING_MS};

/// One tone burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration: Duration,
}

/// A started alarm pattern. Tones are handed out once each, in order.
#[derive(Debug, Clone)]
pub struct AlarmSequence {
    started: Instant,
    next: usize,
}

impl AlarmSequence {
    pub fn start(now: Instant) -> Self {
        Self {
            started: now,
            next: 0,
        }
    }

    fn offset(index: usize) -> Duration {
        Duration::from_millis(ALARM_TONE_SPACING_MS * index as u64)
    }

    /// Total time from start until the last tone ends.
    pub fn total_duration() -> Duration {
        let last = ALARM_PATTERN_HZ.len().saturating_sub(1);
        Self::offset(last) + Duration::from_millis(ALARM_TONE_MS)
    }

    /// Tones whose start time has been reached since the previous call.
    pub fn due(&mut self, now: Instant) -> Vec<Tone> {
        let elapsed = now.saturating_duration_since(self.started);
        let mut tones = Vec::new();
        while self.next < ALARM_PATTERN_HZ.len() && elapsed >= Self::offset(self.next) {
            tones.push(Tone {
                frequency_hz: ALARM_PATTERN_HZ[self.next],
                duration: Duration::from_millis(ALARM_TONE_MS),
            });
            self.next += 1;
        }
        tones
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= Self::total_duration()
    }
}

/// Destination for alarm tones.
pub trait AlarmSink {
    fn play(&mut self, tone: Tone);
}

/// Rings the terminal bell once per tone. A terminal cannot pitch the bell,
/// so the frequency only shows up in the log.
pub struct TerminalBell;

impl AlarmSink for TerminalBell {
    fn play(&mut self, tone: Tone) {
        debug!(hz = tone.frequency_hz, ms = tone.duration.as_millis() as u64, "alarm tone");
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

/// Swallows tones while the user has muted the alarm.
pub struct Muted;

impl AlarmSink for Muted {
    fn play(&mut self, tone: Tone) {
        debug!(hz = tone.frequency_hz, "alarm tone muted");
    }
}

/// Keeps every tone it receives.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub tones: Vec<Tone>,
}

#[cfg(test)]
impl AlarmSink for RecordingSink {
    fn play(&mut self, tone: Tone) {
        self.tones.push(tone);
    }
}
