use crate::ui::Console;
use std::time::{Duration, Instant};

/// Steps of a check run, announced in order
pub const CHECK_STEPS: [&str; 4] = [
    "Locating results file",
    "Parsing results",
    "Validating error rate",
    "Writing error summary",
];

/// Announces the named steps of an operation and how long it took
pub struct ProgressTracker {
    console: Console,
    operation_name: String,
    start_time: Instant,
    steps: Vec<String>,
    current_step: usize,
}

impl ProgressTracker {
    pub fn new(console: Console, operation_name: &str) -> Self {
        console.section(operation_name);
        Self {
            console,
            operation_name: operation_name.to_string(),
            start_time: Instant::now(),
            steps: Vec::new(),
            current_step: 0,
        }
    }

    pub fn with_steps(mut self, steps: &[&str]) -> Self {
        self.steps = steps.iter().map(|step| step.to_string()).collect();
        self
    }

    /// Start the next step
    pub fn start_step(&self) {
        if let Some(step) = self.steps.get(self.current_step) {
            self.console.status(step);
        }
    }

    /// Complete the current step
    pub fn complete_step(&mut self) {
        if let Some(step) = self.steps.get(self.current_step) {
            self.console.success(step);
            self.current_step += 1;
        }
    }

    /// Skip the current step
    pub fn skip_step(&mut self, reason: &str) {
        if let Some(step) = self.steps.get(self.current_step) {
            self.console.warning(&format!("Skipped: {step} ({reason})"));
            self.current_step += 1;
        }
    }

    /// Complete the operation
    pub fn complete(&self) {
        self.console.success(&format!(
            "{} completed in {}",
            self.operation_name,
            format_duration(self.start_time.elapsed())
        ));
    }
}

/// Format a duration in a human-readable way. Check runs are short, so
/// sub-second precision matters more than hours.
fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis} ms")
    } else if millis < 60_000 {
        format!("{:.1} seconds", duration.as_secs_f64())
    } else {
        let seconds = duration.as_secs();
        format!("{} minutes {} seconds", seconds / 60, seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42 ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5 seconds");
        assert_eq!(format_duration(Duration::from_secs(125)), "2 minutes 5 seconds");
    }

    #[test]
    fn test_steps_advance_and_stop_at_end() {
        let mut tracker = ProgressTracker::new(Console::new(true, false), "Check").with_steps(&CHECK_STEPS);

        tracker.complete_step();
        tracker.skip_step("no errors");
        tracker.complete_step();
        tracker.complete_step();
        tracker.complete_step();

        assert_eq!(tracker.current_step, CHECK_STEPS.len());
    }
}
