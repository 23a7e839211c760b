use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ledgersift_charts::render_png;
use ledgersift_core::analyze;
use ledgersift_extract::parse_document;
use std::fs;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod export;
mod inputs;
mod presets;
mod report;

#[derive(Parser, Debug)]
#[command(
    name = "ledgersift",
    version,
    about = "Extract and analyze bank statement transactions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transaction tables from statement documents
    Extract {
        /// Statement documents (PDF or extracted text)
        #[arg(required = true)]
        docs: Vec<PathBuf>,

        /// Password for encrypted documents
        #[arg(long)]
        password: Option<String>,

        /// Directory for extracted tables
        #[arg(long, default_value = "results")]
        out_dir: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: export::TableFormat,
    },

    /// Run analysis presets over documents and/or stored tables
    Analyze {
        /// Documents (PDF/text) or stored `.json` tables, combined in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Preset file (TOML, `[[preset]]` entries)
        #[arg(long)]
        presets: PathBuf,

        /// Comma-separated preset names to run (default: all, file order)
        #[arg(long)]
        select: Option<String>,

        /// Password for encrypted documents
        #[arg(long)]
        password: Option<String>,

        /// Write rendered charts as `<preset>.png` into this directory
        #[arg(long)]
        charts_dir: Option<PathBuf>,

        /// Write a JSON report bundle with charts embedded base64
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Extract {
            docs,
            password,
            out_dir,
            format,
        } => run_extract(&docs, &password.unwrap_or_default(), &out_dir, format),

        Command::Analyze {
            inputs,
            presets,
            select,
            password,
            charts_dir,
            report,
        } => run_analyze(
            &inputs,
            &presets,
            select.as_deref(),
            &password.unwrap_or_default(),
            charts_dir.as_deref(),
            report.as_deref(),
        ),
    }
}

/// Per-document extraction to CSV/JSON. One document's failure never stops
/// the rest of the batch.
fn run_extract(
    docs: &[PathBuf],
    password: &str,
    out_dir: &std::path::Path,
    format: export::TableFormat,
) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    for doc in docs {
        let bytes = match fs::read(doc) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(input = %doc.display(), error = %err, "cannot read document");
                continue;
            }
        };

        match parse_document(&bytes, password) {
            Ok(table) if table.is_empty() => {
                warn!(input = %doc.display(), "no extractable data");
            }
            Ok(table) => {
                let stem = doc
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("statement");
                let out = out_dir.join(format!("{stem}.{}", format.extension()));
                export::write_table(&table, &out, format)?;
                println!(
                    "{}: {} transactions -> {}",
                    doc.display(),
                    table.len(),
                    out.display()
                );
            }
            Err(err) if err.is_credential_failure() => {
                warn!(input = %doc.display(), "{err}; pass --password");
            }
            Err(err) => {
                warn!(input = %doc.display(), error = %err, "document failed to parse");
            }
        }
    }

    Ok(())
}

fn run_analyze(
    inputs: &[PathBuf],
    presets_path: &std::path::Path,
    select: Option<&str>,
    password: &str,
    charts_dir: Option<&std::path::Path>,
    report_path: Option<&std::path::Path>,
) -> Result<()> {
    let table = inputs::load_combined_table(inputs, password)?;
    println!(
        "Combined table: {} transactions from {} input(s)\n",
        table.len(),
        inputs.len()
    );

    let mut named = presets::load_presets(presets_path)?;
    if let Some(names) = select {
        named = presets::select(named, names);
    }
    if named.is_empty() {
        warn!("no usable presets to run");
    }

    if let Some(dir) = charts_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating charts directory {}", dir.display()))?;
    }

    let mut entries = Vec::new();
    for named_preset in named {
        let analysis = analyze(&table, &named_preset.preset);
        report::print_report(&named_preset.name, &analysis);

        // Chart rendering is best-effort: a failure downgrades to "no chart".
        let png = analysis.chart.as_ref().and_then(|spec| match render_png(spec) {
            Ok(png) => Some(png),
            Err(err) => {
                warn!(
                    preset = %named_preset.name,
                    error = format!("{err:#}"),
                    "chart rendering failed"
                );
                None
            }
        });

        if let (Some(dir), Some(png)) = (charts_dir, &png) {
            let path = dir.join(format!("{}.png", named_preset.name));
            fs::write(&path, png).with_context(|| format!("writing {}", path.display()))?;
            println!("Chart written to {}\n", path.display());
        }

        if report_path.is_some() {
            entries.push(report::ReportEntry::new(named_preset.name, analysis, png));
        }
    }

    if let Some(path) = report_path {
        let json = serde_json::to_vec_pretty(&entries).context("serializing report bundle")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
