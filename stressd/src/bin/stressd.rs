use anyhow::{anyhow, Context};
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::io;
use stressd::{Arg, Config, Task};

/// completed count only, no live statistics
const PROGRESS_TEMPLATE: &str =
    "{spinner} [{elapsed_precise}] {wide_bar} {pos}/{len}";

fn progress_bar() -> anyhow::Result<ProgressBar> {
    let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
        .context("invalid progress bar template")?;
    Ok(ProgressBar::new(0).with_style(style))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();

    let arg = Arg::parse();
    if let Some(shell) = arg.completions {
        let mut command = Arg::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return Ok(());
    }

    let config = Config::try_from(&arg)?;
    println!("Target:      {}", config.url);
    println!("Requests:    {}", config.requests);
    println!("Concurrency: {}", config.concurrency);
    println!();

    let mut task = Task::new(config)
        .map_err(|e| anyhow!(e))
        .context("failed to build http client")?;
    if !arg.no_progress {
        task = task.with_progress(progress_bar()?);
    }

    let report = task.run().await?;
    info!("run complete");
    println!("{}", report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_counts_only() {
        assert!(progress_bar().is_ok());
        assert!(!PROGRESS_TEMPLATE.contains("per_sec"));
        assert!(!PROGRESS_TEMPLATE.contains("msg"));
    }
}
