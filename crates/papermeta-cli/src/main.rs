use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use papermeta_core::config_file::{self, ExtractionConfig};
use papermeta_core::{CountryRegistry, MetadataRecord, PdfBackend};
use papermeta_ner::GazetteerRecognizer;
use papermeta_parsing::{MetadataExtractor, ParsingConfigBuilder};
use papermeta_pdf::PdfExtractBackend;

/// Scholarly PDF metadata extractor - title, authors, year, countries,
/// venue, DOI and abstract from a paper's text
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the metadata record of a PDF and print it as JSON
    Analyze {
        /// Path to the PDF file
        file_path: PathBuf,

        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print compact (single-line) JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the raw text extracted from a PDF
    Text {
        /// Path to the PDF file
        file_path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("papermeta=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let extraction = config_file::load_config().extraction.unwrap_or_default();

    match cli.command {
        Command::Analyze {
            file_path,
            output,
            compact,
        } => analyze(&file_path, output.as_deref(), compact, &extraction),
        Command::Text { file_path } => text(&file_path, &extraction),
    }
}

fn backend(extraction: &ExtractionConfig) -> PdfExtractBackend {
    PdfExtractBackend::new().with_ligature_expansion(extraction.expand_ligatures.unwrap_or(true))
}

fn ensure_file(path: &Path) -> anyhow::Result<()> {
    if !path.is_file() {
        anyhow::bail!("File not found: {}", path.display());
    }
    Ok(())
}

fn analyze(
    file_path: &Path,
    output: Option<&Path>,
    compact: bool,
    extraction: &ExtractionConfig,
) -> anyhow::Result<()> {
    ensure_file(file_path)?;

    let registry = CountryRegistry::iso3166()?;
    let recognizer = GazetteerRecognizer::new(&registry)?;
    let config = ParsingConfigBuilder::from_extraction_config(extraction).build()?;
    let extractor = MetadataExtractor::with_config(config);

    let record = extractor.extract_metadata(
        file_path,
        &backend(extraction),
        &recognizer,
        &registry,
    )?;
    tracing::info!(path = %file_path.display(), title = %record.title, "analyzed document");

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            write_record(&mut file, &record, compact)?;
        }
        None => write_record(&mut std::io::stdout().lock(), &record, compact)?,
    }
    Ok(())
}

fn text(file_path: &Path, extraction: &ExtractionConfig) -> anyhow::Result<()> {
    ensure_file(file_path)?;
    let text = backend(extraction).extract_text(file_path)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(stdout)?;
    }
    Ok(())
}

fn write_record(
    writer: &mut dyn Write,
    record: &MetadataRecord,
    compact: bool,
) -> anyhow::Result<()> {
    if compact {
        serde_json::to_writer(&mut *writer, record)?;
    } else {
        serde_json::to_writer_pretty(&mut *writer, record)?;
    }
    writeln!(writer)?;
    Ok(())
}
