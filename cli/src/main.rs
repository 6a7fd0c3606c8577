//! bboxgen CLI - layout annotation generator

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use bboxgen::{BatchDriver, BatchSummary, CsvSink, MatchOptions, ToolOptions, ToolSource};

#[derive(Parser)]
#[command(name = "bboxgen")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Generate bounding boxes for files created by the LaTeX generator",
    long_about = None
)]
struct Cli {
    /// Directory of all files, main-*.pdf and meta-*.json
    #[arg(value_name = "BATCH")]
    batch: PathBuf,

    /// Annotation table to append to
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "BBOXGEN_OUTPUT",
        default_value = "annotations.csv"
    )]
    output: PathBuf,

    /// pdftk executable
    #[arg(
        long,
        value_name = "PATH",
        env = "BBOXGEN_PDFTK",
        default_value = "pdftk"
    )]
    pdftk: PathBuf,

    /// pdf2xml executable
    #[arg(
        long,
        value_name = "PATH",
        env = "BBOXGEN_PDF2XML",
        default_value = "pdf2xml"
    )]
    pdf2xml: PathBuf,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let tools = ToolOptions::new()
        .with_pdftk(&cli.pdftk)
        .with_pdf2xml(&cli.pdf2xml);

    match cmd_annotate(&cli.batch, &cli.output, tools) {
        Ok(summary) => print_summary(&summary, &cli.output),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn cmd_annotate(
    batch: &Path,
    output: &Path,
    tools: ToolOptions,
) -> Result<BatchSummary, Box<dyn std::error::Error>> {
    let driver = BatchDriver::new(ToolSource::new(tools), MatchOptions::default());
    let mut sink = CsvSink::append(output)?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Annotating documents...");

    let summary = driver.run_with_progress(batch, &mut sink, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    });

    match summary {
        Ok(summary) => {
            pb.finish_with_message("Done!");
            Ok(summary)
        }
        Err(e) => {
            pb.abandon();
            Err(e.into())
        }
    }
}

fn print_summary(summary: &BatchSummary, output: &Path) {
    println!("\n{}", "Annotation Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Documents".bold(), summary.document_count());
    println!("{}: {}", "Pages".bold(), summary.page_count());
    println!("{}: {}", "Records".bold(), summary.record_count());
    println!("{}: {}", "Output".bold(), output.display());

    let missing: Vec<_> = summary.missing_titles().collect();
    if !missing.is_empty() {
        println!();
        println!(
            "{} {} documents without a title match:",
            "Warning:".yellow().bold(),
            missing.len()
        );
        for doc in missing {
            println!("  {} main-{}.pdf", "─".dimmed(), doc.id);
        }
    }
}
