//! arg module define the application entry arguments [Arg]

use clap::{crate_authors, Parser, ValueHint};
use clap_complete::Shell;
use std::time::Duration;

fn is_number(s: &str) -> bool {
    s.parse::<u64>().is_ok()
}

pub(crate) fn parse_duration(
    arg: &str,
) -> Result<Duration, std::num::ParseIntError> {
    if is_number(arg) {
        return Ok(Duration::from_secs(arg.parse()?));
    }

    let input = arg.strip_suffix('s').unwrap_or(arg);
    let seconds = input.parse()?;
    Ok(Duration::from_secs(seconds))
}

#[derive(Debug, Parser)]
#[command(author(crate_authors!("\n")), version, about)]
pub struct Arg {
    /// Target Url
    #[arg(
        long,
        short,
        required_unless_present("completions"),
        value_hint = ValueHint::Url,
        help = "Target Url"
    )]
    pub url: Option<String>,

    /// Number of requests
    #[arg(
        long,
        short = 'n',
        required_unless_present("completions"),
        help = "Number of requests"
    )]
    pub requests: Option<u64>,

    /// Number of parallel workers
    #[arg(
        long,
        short,
        default_value_t = 1,
        help = "Number of parallel workers"
    )]
    pub concurrency: u32,

    /// Socket/request timeout
    #[arg(
        long,
        short,
        value_parser = parse_duration,
        default_value = "30s",
        help = "Socket/request timeout"
    )]
    pub timeout: Duration,

    /// Hide the progress bar
    #[arg(long, help = "Hide the progress bar")]
    pub no_progress: bool,

    #[arg(long, value_enum, help = "Print a shell completion script")]
    pub completions: Option<Shell>,
}
