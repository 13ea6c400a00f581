//! Trend direction between consecutive valid samples, and the session
//! baseline used for the load ratio.

/// Direction of change relative to the previous valid sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// No previous value to compare against.
    Unknown,
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Flat | Trend::Unknown => "→",
        }
    }
}

/// Compare the current value against the previous one.
pub fn indicator(current: f64, previous: Option<f64>) -> Trend {
    match previous {
        None => Trend::Unknown,
        Some(prev) if current > prev => Trend::Up,
        Some(prev) if current < prev => Trend::Down,
        Some(_) => Trend::Flat,
    }
}

/// Previous valid cpu/memory values plus the trends computed from them.
#[derive(Debug, Clone, Default)]
pub struct TrendTracker {
    prev_cpu: Option<f64>,
    prev_memory: Option<f64>,
    cpu: Option<Trend>,
    memory: Option<Trend>,
}

impl TrendTracker {
    /// Evaluate a newly plotted sample, then remember it as the previous one.
    pub fn observe(&mut self, cpu: f64, memory: f64) {
        self.cpu = Some(indicator(cpu, self.prev_cpu));
        self.memory = Some(indicator(memory, self.prev_memory));
        self.prev_cpu = Some(cpu);
        self.prev_memory = Some(memory);
    }

    /// Mark the trends as pending without forgetting the previous values.
    pub fn mark_pending(&mut self) {
        self.cpu = None;
        self.memory = None;
    }

    /// `None` means pending (the latest reading was not a valid sample).
    pub fn cpu(&self) -> Option<Trend> {
        self.cpu
    }

    pub fn memory(&self) -> Option<Trend> {
        self.memory
    }
}

/// First cpu value seen under NORMAL status. Latched once per session.
#[derive(Debug, Clone, Copy, Default)]
pub struct Baseline {
    value: Option<f64>,
}

impl Baseline {
    /// Set the baseline if it is not set yet. Returns true when this call latched it.
    pub fn latch(&mut self, cpu: f64) -> bool {
        if self.value.is_some() {
            return false;
        }
        self.value = Some(cpu);
        true
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// `current / baseline`, unavailable while unset or when the baseline is zero.
    pub fn ratio(&self, current: f64) -> Option<f64> {
        match self.value {
            Some(base) if base != 0.0 => Some(current / base),
            _ => None,
        }
    }

    /// Ratio formatted for display, e.g. `1.50x`.
    pub fn ratio_label(&self, current: f64) -> Option<String> {
        self.ratio(current).map(|r| format!("{:.2}x", r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_directions() {
        assert_eq!(indicator(55.0, Some(40.0)), Trend::Up);
        assert_eq!(indicator(40.0, Some(55.0)), Trend::Down);
        assert_eq!(indicator(40.0, Some(40.0)), Trend::Flat);
        assert_eq!(indicator(40.0, None), Trend::Unknown);
    }

    #[test]
    fn unknown_renders_like_flat() {
        assert_eq!(Trend::Unknown.arrow(), Trend::Flat.arrow());
        assert_ne!(Trend::Up.arrow(), Trend::Down.arrow());
    }

    #[test]
    fn tracker_compares_against_last_observed() {
        let mut tracker = TrendTracker::default();
        tracker.observe(40.0, 200.0);
        assert_eq!(tracker.cpu(), Some(Trend::Unknown));

        tracker.observe(55.0, 150.0);
        assert_eq!(tracker.cpu(), Some(Trend::Up));
        assert_eq!(tracker.memory(), Some(Trend::Down));
        assert_eq!((tracker.prev_cpu, tracker.prev_memory), (Some(55.0), Some(150.0)));
    }

    #[test]
    fn pending_keeps_previous_values() {
        let mut tracker = TrendTracker::default();
        tracker.observe(40.0, 200.0);
        tracker.mark_pending();
        assert_eq!(tracker.cpu(), None);
        assert_eq!((tracker.prev_cpu, tracker.prev_memory), (Some(40.0), Some(200.0)));

        tracker.observe(40.0, 210.0);
        assert_eq!(tracker.cpu(), Some(Trend::Flat));
        assert_eq!(tracker.memory(), Some(Trend::Up));
    }

    #[test]
    fn baseline_latches_once() {
        let mut baseline = Baseline::default();
        assert!(baseline.latch(20.0));
        assert!(!baseline.latch(80.0));
        assert_eq!(baseline.value(), Some(20.0));
        assert_eq!(baseline.ratio_label(30.0).as_deref(), Some("1.50x"));
    }

    #[test]
    fn ratio_unavailable_without_usable_baseline() {
        let mut baseline = Baseline::default();
        assert!(baseline.ratio(10.0).is_none());

        baseline.latch(0.0);
        assert!(baseline.ratio(10.0).is_none());
        assert!(baseline.ratio_label(10.0).is_none());
    }
}
