//! Command-line shell around the WXR conversion engine: reads an export
//! file, maps flags onto a [`ConversionConfig`], and writes the resulting
//! Markdown files to a directory.
mod logging;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use convert_logging::{convert_info, convert_warn};
use wxr_engine::{
    convert_bytes, write_output_files, Conversion, ConversionConfig, FrontMatterStyle,
};

#[derive(Debug, Parser)]
#[command(
    name = "wxr2md",
    about = "Convert a WordPress WXR export to individual Markdown files."
)]
struct Args {
    /// Path to the WordPress WXR XML export file.
    xml_file: PathBuf,

    /// Output directory for the generated Markdown files.
    #[arg(short, long, default_value = "posts")]
    output: PathBuf,

    /// Post types to include.
    #[arg(long, value_delimiter = ',', default_value = "post")]
    types: Vec<String>,

    /// Post statuses to include.
    #[arg(long, value_delimiter = ',', default_value = "publish")]
    statuses: Vec<String>,

    /// Omit the YYYYMMDD- date prefix from filenames.
    #[arg(long)]
    no_date_prefix: bool,

    /// Use YAML front-matter instead of an inline heading.
    #[arg(long)]
    yaml: bool,

    /// Write a manifest.json summary next to the output files.
    #[arg(long)]
    manifest: bool,

    /// Also write logs to ./convert.log.
    #[arg(long)]
    log_file: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::initialize(if args.log_file {
        logging::LogDestination::Both
    } else {
        logging::LogDestination::Terminal
    });

    let config = ConversionConfig {
        post_types: args.types.iter().cloned().collect::<BTreeSet<_>>(),
        post_statuses: args.statuses.iter().cloned().collect::<BTreeSet<_>>(),
        date_prefix: !args.no_date_prefix,
        front_matter: if args.yaml {
            FrontMatterStyle::Yaml
        } else {
            FrontMatterStyle::InlineHeading
        },
    };

    let bytes = fs::read(&args.xml_file)
        .with_context(|| format!("reading export file {:?}", args.xml_file))?;
    let conversion = convert_bytes(&bytes, &config)
        .with_context(|| format!("converting {:?}", args.xml_file))?;

    for warning in &conversion.warnings {
        convert_warn!("{warning}");
    }

    let written = write_output_files(&args.output, &conversion.files)
        .with_context(|| format!("writing output to {:?}", args.output))?;
    for path in &written {
        convert_info!("created {:?}", path);
    }

    if args.manifest {
        write_manifest(&args.output, &conversion)?;
    }

    println!(
        "Done - {} file(s) written to {:?}.",
        written.len(),
        args.output
    );
    if !conversion.warnings.is_empty() {
        println!("{} warning(s); see the log output above.", conversion.warnings.len());
    }
    Ok(())
}

/// Summary of the run for downstream tooling: file names plus warnings.
fn write_manifest(dir: &Path, conversion: &Conversion) -> anyhow::Result<()> {
    let manifest = serde_json::json!({
        "file_count": conversion.files.len(),
        "files": conversion.files.keys().collect::<Vec<_>>(),
        "warnings": conversion
            .warnings
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>(),
    });
    let path = dir.join("manifest.json");
    fs::write(&path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("writing manifest {:?}", path))?;
    convert_info!("created {:?}", path);
    Ok(())
}
