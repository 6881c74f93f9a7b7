use clap::Parser;
use testrun::ValidationStrategy;

#[derive(Parser)]
#[command(name = "jmcheck")]
#[command(
    author,
    version,
    about = "Fail a load test run when its share of 4xx/5xx responses is too high"
)]
pub struct Cli {
    /// Results CSV to check; a bare file name is looked up in the current directory.
    /// Defaults to the first .csv file found in the current directory
    pub csv: Option<String>,

    /// Highest combined client + server error percentage that still passes
    #[clap(short = 't', long)]
    pub acceptable_percent: Option<f64>,

    /// Rule used to decide whether the run failed
    #[clap(short, long, value_enum)]
    pub strategy: Option<ValidationStrategy>,

    /// Header of the status code column
    #[clap(long)]
    pub status_column: Option<String>,

    /// Directory the error summary is written to (defaults to the current directory)
    #[clap(short = 'o', long)]
    pub report_dir: Option<String>,

    /// Configuration file path
    #[clap(short, long, default_value = testrun::CONFIG_FILE_NAME)]
    pub config: String,

    /// Print the validation result as JSON instead of progress output
    #[clap(long, default_value_t = false)]
    pub json: bool,

    /// Enable verbose output with additional information
    #[clap(short, long, default_value_t = false)]
    pub verbose: bool,
}
