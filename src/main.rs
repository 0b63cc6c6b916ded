use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::info;

use linepatch::config::PatchConfig;
use linepatch::diff::change_counts;
use linepatch::text::parse_line_number;
use linepatch::{
    apply_range_replacement, plan_range_replacement, PatchOptions, PatchOutcome, Replacement,
};

/// Replace a range of lines in a text file
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to edit
    path: PathBuf,

    /// First line to replace (1-based, inclusive)
    #[arg(allow_hyphen_values = true)]
    from: String,

    /// Last line to replace (1-based, inclusive)
    #[arg(allow_hyphen_values = true)]
    to: String,

    /// Replacement text; stdin is read when neither --text nor --from-file is given
    #[arg(short, long, conflicts_with = "from_file")]
    text: Option<String>,

    /// Read the replacement text from a file, decoded like the target
    #[arg(short = 'f', long)]
    from_file: Option<PathBuf>,

    /// Delete the range instead of replacing it
    #[arg(short, long, conflicts_with_all = ["text", "from_file"])]
    delete: bool,

    /// Encoding label of the target file (default from config, else utf-8)
    #[arg(short, long)]
    encoding: Option<String>,

    /// Config file (.toml, .json, .yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the diff instead of writing
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

async fn read_replacement(cli: &Cli, options: &PatchOptions) -> Result<Replacement> {
    if cli.delete {
        return Ok(Replacement::Lines(Vec::new()));
    }

    if let Some(text) = &cli.text {
        return Ok(Replacement::Text(text.clone()));
    }

    if let Some(path) = &cli.from_file {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read replacement from {}", path.display()))?;
        let text = options.encoding.decode(&bytes).with_context(|| {
            format!(
                "Replacement file {} is not valid {}",
                path.display(),
                options.encoding
            )
        })?;
        return Ok(Replacement::Text(text.into_owned()));
    }

    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read replacement from stdin")?;
    Ok(Replacement::Text(text))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = PatchConfig::discover(cli.config.as_deref()).context("Failed to load config")?;
    linepatch::logging::init_logging(cli.verbose, config.log_filter.as_deref())?;
    info!("linepatch v{}", linepatch::version());

    let from = parse_line_number(&cli.from).context("Invalid FROM line")?;
    let to = parse_line_number(&cli.to).context("Invalid TO line")?;
    let options = config.patch_options(cli.encoding.as_deref())?;
    let replacement = read_replacement(&cli, &options).await?;

    if cli.dry_run {
        let plan = plan_range_replacement(&cli.path, from, to, &replacement, &options).await?;
        if plan.is_noop() {
            println!("{}: no changes", cli.path.display());
        } else {
            let (inserted, deleted) = change_counts(&plan.original, &plan.updated);
            print!("{}", plan.diff());
            println!(
                "{}: {} insertion(s), {} deletion(s) (dry run)",
                cli.path.display(),
                inserted,
                deleted
            );
        }
        return Ok(());
    }

    match apply_range_replacement(&cli.path, from, to, &replacement, &options).await? {
        PatchOutcome::Written => println!("{}: replaced lines {}-{}", cli.path.display(), from, to),
        PatchOutcome::Unchanged => println!("{}: unchanged", cli.path.display()),
    }

    Ok(())
}
