use colored::Colorize;
use testrun::ValidationResult;

/// Console output for a check run. Quiet mode keeps stdout free for JSON.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    quiet: bool,
    verbose: bool,
}

impl Console {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }

    /// Print a status message with a spinner-like indicator
    pub fn status(&self, message: &str) {
        if !self.quiet {
            println!("{} {} ... ", "⏳".yellow(), message.bright_white());
        }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✅".green(), message.green());
        }
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "⚠️ ".yellow(), message.yellow());
        }
    }

    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", format!("==== {} ====", title).cyan().bold());
        }
    }

    /// Extra detail, only shown with --verbose
    pub fn detail(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{} {}", "ℹ️ ".blue(), message.blue());
        }
    }

    /// Per-class breakdown followed by the pass/fail verdict
    pub fn summary(&self, result: &ValidationResult) {
        if self.quiet {
            return;
        }

        if let Some(percentages) = &result.percentages {
            let total = percentages.total_responses;
            print_class_line("Client errors (4xx)", percentages.client_errors, total, percentages.client_percent);
            print_class_line("Server errors (5xx)", percentages.server_errors, total, percentages.server_percent);
        }

        let detail = verdict_detail(result);
        if result.passed {
            self.success(&format!("Run passed: {detail}"));
        } else {
            eprintln!("{} {}", "❌".red(), format!("Run failed: {detail}").red().bold());
        }
    }
}

/// One-line reason for the verdict. The combined figure is the sum of two
/// rounded percentages, so it is printed with two decimals again.
fn verdict_detail(result: &ValidationResult) -> String {
    match result.acceptable_percent {
        Some(limit) => format!("{:.2} % errors, limit {limit} %", result.combined_percent()),
        None => format!("checked success flags and failure messages ({} strategy)", result.strategy),
    }
}

fn print_class_line(label: &str, count: usize, total: usize, percent: f64) {
    println!(
        "  {:<20} {:>6} of {:<6} {}",
        label,
        count,
        total,
        format!("{percent} %").bold()
    );
}

/// Print an error message. Always shown, even in quiet mode.
pub fn error_message(message: &str) {
    eprintln!("{} {}", "Error:".bold().red(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use testrun::{ErrorPercentages, ValidationStrategy};

    #[test]
    fn test_verdict_detail_formats_combined_percent() {
        // 1 client and 2 server errors in 1000 rows: 0.1 + 0.2 is not exactly 0.3 as f64
        let result = ValidationResult {
            passed: true,
            strategy: ValidationStrategy::ErrorPercent,
            acceptable_percent: Some(1.0),
            has_errors: true,
            percentages: Some(ErrorPercentages {
                total_responses: 1000,
                client_errors: 1,
                server_errors: 2,
                client_percent: 0.1,
                server_percent: 0.2,
            }),
        };

        assert_eq!(verdict_detail(&result), "0.30 % errors, limit 1 %");
    }

    #[test]
    fn test_verdict_detail_for_legacy() {
        let result = ValidationResult {
            passed: false,
            strategy: ValidationStrategy::Legacy,
            acceptable_percent: None,
            has_errors: true,
            percentages: None,
        };

        assert_eq!(
            verdict_detail(&result),
            "checked success flags and failure messages (legacy strategy)"
        );
    }
}
