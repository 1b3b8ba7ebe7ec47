use anyhow::{Context, Result};
use bookmarkpdf::{
    add_bookmarks_to_pdf, build_outline_tree, parse_bookmark_file, AddBookmarksOptions,
    AddBookmarksReport, BookmarkError,
};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bookmarkpdf",
    about = "Add bookmarks to a PDF from a plain-text table of contents",
    long_about = "Add bookmarks to a PDF from a plain-text table of contents.\n\
                  \n\
                  Each line of the bookmark file is `<level> <title> <page>`; lines starting\n\
                  with # are comments. The page offset is the difference between printed\n\
                  and physical page numbers: if printed page 1 is the fifth page of the\n\
                  PDF, the offset is 4.",
    version,
    author
)]
struct Cli {
    /// Input PDF file
    input: PathBuf,

    /// Output PDF file
    output: PathBuf,

    /// Bookmark list file
    bookmarks: PathBuf,

    /// Page offset added to every printed page number
    #[arg(default_value_t = 0, allow_negative_numbers = true)]
    page_offset: i64,

    /// Print the reconstructed outline as JSON without touching any PDF
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if cli.dry_run {
        return dry_run(&cli);
    }

    tracing::debug!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        offset = cli.page_offset,
        "adding bookmarks"
    );
    let options = AddBookmarksOptions::with_page_offset(cli.page_offset);
    match add_bookmarks_to_pdf(&cli.input, &cli.output, &cli.bookmarks, &options) {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(BookmarkError::NoBookmarks) => {
            anyhow::bail!("bookmark file {} has no valid entries", cli.bookmarks.display())
        }
        Err(err) => Err(err).context("failed to add bookmarks"),
    }
}

fn print_report(report: &AddBookmarksReport) {
    for line in &report.malformed {
        println!("Warning: {}", line);
    }
    for warning in &report.out_of_range {
        println!("Warning: {}", warning);
    }

    if let Some(output) = &report.output {
        println!(
            "✓ Added {} bookmarks to {}",
            report.attached,
            output.display()
        );
    }
    if report.page_offset != 0 {
        println!(
            "Page offset applied: {} (printed page + {} = PDF page)",
            report.page_offset, report.page_offset
        );
    }
}

fn dry_run(cli: &Cli) -> Result<()> {
    if !cli.bookmarks.exists() {
        return Err(BookmarkError::BookmarkFileNotFound(cli.bookmarks.clone()).into());
    }

    let parsed = parse_bookmark_file(&cli.bookmarks, cli.page_offset)
        .with_context(|| format!("failed to read {}", cli.bookmarks.display()))?;
    tracing::debug!(records = parsed.len(), "parsed bookmark file for dry run");
    // stdout carries only the JSON tree
    for line in &parsed.malformed {
        eprintln!("Warning: {}", line);
    }
    if parsed.is_empty() {
        anyhow::bail!("bookmark file {} has no valid entries", cli.bookmarks.display());
    }

    let tree = build_outline_tree(&parsed.records);
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}
