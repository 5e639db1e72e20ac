use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "fixdates", version, about = "Rename files to file_YYYY-MM-DD.ext using the date in their name, content or mtime")]
struct Cli {
    /// Directories to process (walked recursively)
    #[arg(required = true)]
    roots: Vec<PathBuf>,

    /// Show what would be renamed without touching anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Disable date guessing from filenames
    #[arg(long)]
    no_guess: bool,

    /// Read EXIF capture dates from images
    #[arg(long)]
    exif: bool,

    /// Do not fall back to the last-modified time
    #[arg(long)]
    no_mtime: bool,

    /// Compute dates on a single thread
    #[arg(long)]
    sequential: bool,

    /// Print the summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let t_total = std::time::Instant::now();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = fixdates_core::RenameOptions {
        roots: cli.roots,
        dry_run: cli.dry_run,
        parallel: !cli.sequential,
        date: fixdates_core::DateOptions {
            guess: !cli.no_guess,
            exif: cli.exif,
            modified: !cli.no_mtime,
        },
    };

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40}] {pos}/{len} {msg}")
            .context("invalid progress template")?,
    );
    let bar = pb.clone();
    let on_progress = move |stage: &str, done: u64, total: u64, message: &str| {
        if stage != "rename" {
            return;
        }
        bar.set_length(total);
        bar.set_position(done);
        bar.set_message(message.to_string());
    };

    let result = fixdates_core::process(&options, &on_progress)?;
    pb.finish_and_clear();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let verb = if result.dry_run { "would rename" } else { "renamed" };
        eprintln!(
            "Done! {} files, {} {}, {} unchanged, {} collisions suffixed ({:.2}s)",
            result.total_files,
            verb,
            result.renamed,
            result.unchanged,
            result.collisions_resolved,
            t_total.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["fixdates", "-n", "--exif", "--no-mtime", "a", "b"]).unwrap();
        assert!(cli.dry_run && cli.exif && cli.no_mtime);
        assert!(!cli.no_guess && !cli.sequential);
        assert_eq!(cli.roots, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert!(Cli::try_parse_from(["fixdates"]).is_err());
    }
}
