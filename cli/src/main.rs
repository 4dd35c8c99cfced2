//! pdfsift CLI - PDF outline extraction and section ranking

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfsift::{extract_outline, process_documents, HashEmbedder, RankInput};

#[derive(Parser)]
#[command(name = "pdfsift")]
#[command(version)]
#[command(about = "Extract PDF outlines and rank sections by persona relevance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title and heading outline from every PDF in a directory
    Outline {
        /// Input directory with PDFs
        #[arg(long, value_name = "DIR", default_value = "input")]
        input: PathBuf,

        /// Output directory for JSON outlines
        #[arg(long, value_name = "DIR", default_value = "output")]
        output: PathBuf,
    },

    /// Rank document sections against a persona and task
    Rank {
        /// Input payload (documents, persona, job_to_be_done)
        #[arg(long, value_name = "FILE", default_value = "input/sample_input.json")]
        input: PathBuf,

        /// Directory holding the listed PDF files
        #[arg(long, value_name = "DIR", default_value = "data")]
        documents: PathBuf,

        /// Output report path
        #[arg(long, value_name = "FILE", default_value = "output/output.json")]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline { input, output } => cmd_outline(&input, &output),
        Commands::Rank {
            input,
            documents,
            output,
        } => cmd_rank(&input, &documents, &output),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_outline(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut pdf_paths: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    pdf_paths.sort();

    if pdf_paths.is_empty() {
        println!("{} no PDF files in {}", "Warning:".yellow(), input.display());
        return Ok(());
    }

    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(pdf_paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    for path in &pdf_paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(name.clone());

        let outline = extract_outline(path)?;

        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let json_path = output.join(format!("{}.json", stem));
        fs::write(&json_path, serde_json::to_string_pretty(&outline)?)?;

        log::info!("{}: {} headings", name, outline.len());
        pb.inc(1);
    }

    pb.finish_with_message("Done!");
    println!(
        "\n{} {} outlines written to {}",
        "Done!".green().bold(),
        pdf_paths.len(),
        output.display()
    );

    Ok(())
}

fn cmd_rank(input: &Path, documents: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let payload = fs::read_to_string(input)?;
    let rank_input = RankInput::from_json(&payload)?;

    println!(
        "{} {} documents, persona {:?}",
        "Ranking".cyan().bold(),
        rank_input.documents.len(),
        rank_input.persona.role
    );

    let embedder = HashEmbedder::default();
    let report = process_documents(&rank_input, documents, &embedder)?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, serde_json::to_string_pretty(&report)?)?;

    println!(
        "{} {} sections reported, saved to {}",
        "Done!".green().bold(),
        report.extracted_sections.len(),
        output.display()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
}
