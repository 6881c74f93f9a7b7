use crate::cli::Cli;
use crate::error::Result;
use crate::progress::{CHECK_STEPS, ProgressTracker};
use crate::ui::Console;
use std::env;
use std::path::PathBuf;
use testrun::{CheckConfig, CheckEvent, TestRun, discover};

/// Merge the configuration file with command line overrides
fn resolve_config(cli: &Cli) -> Result<CheckConfig> {
    let mut config = CheckConfig::load_or_default(&cli.config)?;

    if let Some(acceptable_percent) = cli.acceptable_percent {
        config.acceptable_percent = acceptable_percent;
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if let Some(status_column) = &cli.status_column {
        config.status_column = status_column.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Executes the check command. Returns whether the run passed.
pub fn execute(cli: Cli) -> Result<bool> {
    let console = Console::new(cli.json, cli.verbose);
    let config = resolve_config(&cli)?;
    let working_dir = env::current_dir()?;
    let report_dir = cli
        .report_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| working_dir.clone());

    let mut progress = ProgressTracker::new(console, "Load test error check").with_steps(&CHECK_STEPS);

    progress.start_step();
    let input = discover::resolve_input(cli.csv.as_deref(), &working_dir)?;
    console.detail(&format!("Results file: {}", input.display()));
    progress.complete_step();

    let outcome = TestRun::check_with(&input, &config, &report_dir, |event| match event {
        CheckEvent::Parsing(_) | CheckEvent::Reporting => progress.start_step(),
        CheckEvent::Parsed(table) => {
            console.detail(&format!(
                "{} rows, columns: {}",
                table.row_count(),
                table.headers().join(", ")
            ));
            progress.complete_step();
        }
        CheckEvent::Validating(strategy) => {
            progress.start_step();
            console.detail(&format!("Strategy: {strategy}"));
        }
        CheckEvent::Validated(_) => progress.complete_step(),
        CheckEvent::Reported(Some(path)) => {
            console.detail(&format!("Error summary written to {}", path.display()));
            progress.complete_step();
        }
        CheckEvent::Reported(None) => progress.skip_step("no error percentages to report"),
    })?;
    let result = outcome.result;

    if cli.json {
        println!("{}", result.to_json()?);
    } else {
        console.summary(&result);
    }
    progress.complete();

    Ok(result.passed)
}
