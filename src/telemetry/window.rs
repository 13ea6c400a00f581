use std::collections::VecDeque;

/// One chart point: time label plus cpu (%) and memory (MB).
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub label: String,
    pub cpu: f64,
    pub memory: f64,
}

/// Bounded FIFO of the most recent valid samples, oldest first.
#[derive(Debug, Clone)]
pub struct TimeSeriesWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl TimeSeriesWindow {
    /// A zero capacity is raised to one so the latest sample is always kept.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest first when the window is full.
    pub fn push(&mut self, label: impl Into<String>, cpu: f64, memory: f64) {
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample {
            label: label.into(),
            cpu,
            memory,
        });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn first_label(&self) -> Option<&str> {
        self.samples.front().map(|s| s.label.as_str())
    }

    pub fn last_label(&self) -> Option<&str> {
        self.samples.back().map(|s| s.label.as_str())
    }

    /// CPU series as chart points, x being the position in the window.
    pub fn cpu_points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, s)| (i as f64, s.cpu))
            .collect()
    }

    /// Memory series as chart points.
    pub fn memory_points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, s)| (i as f64, s.memory))
            .collect()
    }

    pub fn max_cpu(&self) -> f64 {
        self.samples.iter().map(|s| s.cpu).fold(0.0, f64::max)
    }

    pub fn max_memory(&self) -> f64 {
        self.samples.iter().map(|s| s.memory).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_capacity_and_keeps_most_recent() {
        let mut window = TimeSeriesWindow::new(20);
        for i in 0..25 {
            window.push(format!("t{i}"), i as f64, (i * 10) as f64);
        }
        assert_eq!(window.len(), 20);
        let labels: Vec<&str> = window.iter().map(|s| s.label.as_str()).collect();
        let expected: Vec<String> = (5..25).map(|i| format!("t{i}")).collect();
        assert_eq!(labels, expected.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(window.first_label(), Some("t5"));
        assert_eq!(window.last_label(), Some("t24"));
    }

    #[test]
    fn evicts_exactly_one_at_capacity() {
        let mut window = TimeSeriesWindow::new(3);
        window.push("a", 1.0, 1.0);
        window.push("b", 2.0, 2.0);
        window.push("c", 3.0, 3.0);
        assert_eq!(window.len(), 3);
        window.push("d", 4.0, 4.0);
        assert_eq!(window.len(), 3);
        assert_eq!(window.first_label(), Some("b"));
        assert_eq!(window.iter().last().map(|s| s.cpu), Some(4.0));
    }

    #[test]
    fn points_follow_window_order() {
        let mut window = TimeSeriesWindow::new(5);
        window.push("a", 40.0, 100.0);
        window.push("b", 55.0, 120.0);
        assert_eq!(window.cpu_points(), vec![(0.0, 40.0), (1.0, 55.0)]);
        assert_eq!(window.memory_points(), vec![(0.0, 100.0), (1.0, 120.0)]);
        assert_eq!(window.max_cpu(), 55.0);
        assert_eq!(window.max_memory(), 120.0);
    }

    #[test]
    fn zero_capacity_still_holds_one_sample() {
        let mut window = TimeSeriesWindow::new(0);
        window.push("a", 1.0, 1.0);
        window.push("b", 2.0, 2.0);
        assert_eq!(window.capacity(), 1);
        assert_eq!(window.len(), 1);
        assert_eq!(window.last_label(), Some("b"));
    }

    #[test]
    fn empty_window_has_no_labels() {
        let window = TimeSeriesWindow::new(20);
        assert!(window.is_empty());
        assert!(window.first_label().is_none());
        assert_eq!(window.max_cpu(), 0.0);
    }
}
