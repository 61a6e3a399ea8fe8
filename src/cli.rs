// src/cli.rs
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use log::{error, info};

use crate::{
    config::{
        consts::{DEFAULT_CONFIG_FILE, DEFAULT_SWATCH_SIZE},
        file as config_file,
        options::{ExportFormat, PipelineOptions, Vendor},
    },
    error::Error,
    file::resolve_single_out_path,
    filters::{BrandFilter, LightingFilters},
    progress::LogProgress,
    scrape, store, swatch,
};

#[derive(Debug, Parser)]
#[command(name = "lighting_filters", version, about = "Lighting gel dataset: scrape Apollo, Lee and Rosco, compile, browse")]
pub struct Cli {
    /// Settings file (key=value)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Raw vendor dump directory
    #[arg(long, global = true)]
    pub raw_dir: Option<PathBuf>,

    /// Dataset output directory
    #[arg(long, global = true)]
    pub dataset_dir: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Warnings and errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse Apollo swatch-book PDFs into raw/apollo.json
    Apollo {
        #[arg(long)]
        pdf_dir: Option<PathBuf>,
        /// JS file mapping filter IDs to hex colours
        #[arg(long)]
        hex_file: Option<PathBuf>,
    },
    /// Scrape Lee Filters into raw/lee.json
    Lee {
        /// Pause between requests
        #[arg(long)]
        pause_ms: Option<u64>,
    },
    /// Scrape Rosco tech sheets into raw/rosco.json
    Rosco {
        #[arg(long)]
        pause_ms: Option<u64>,
    },
    /// Merge raw dumps into the dataset (schema, JSON, spreadsheet)
    Compile {
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        #[arg(long)]
        no_headers: bool,
    },
    /// List filters in the dataset
    List {
        /// Keep only these brands (repeatable)
        #[arg(long = "brand")]
        brands: Vec<String>,
    },
    /// Print one filter record as JSON
    Show { id: String },
    /// Render a PNG swatch of one filter
    Swatch {
        id: String,
        #[arg(long, default_value_t = DEFAULT_SWATCH_SIZE)]
        size: u32,
        /// Output file or directory (default: <id>.png)
        #[arg(short, long, default_value = "")]
        out: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        }
    }
}

/// Config file, then global flags, then subcommand flags.
pub fn resolve_options(cli: &Cli) -> Result<PipelineOptions> {
    let mut opts = config_file::load(&cli.config)
        .wrap_err_with(|| format!("Reading {}", cli.config.display()))?;

    if let Some(d) = &cli.raw_dir { opts.paths.raw_dir = d.clone(); }
    if let Some(d) = &cli.dataset_dir { opts.paths.dataset_dir = d.clone(); }

    match &cli.command {
        Command::Apollo { pdf_dir, hex_file } => {
            if let Some(d) = pdf_dir { opts.paths.apollo_pdf_dir = d.clone(); }
            if let Some(f) = hex_file { opts.paths.apollo_hex_file = f.clone(); }
        }
        Command::Lee { pause_ms } | Command::Rosco { pause_ms } => {
            if let Some(ms) = pause_ms { opts.scrape.request_pause_ms = *ms; }
        }
        Command::Compile { format, no_headers } => {
            if let Some(f) = format { opts.export.format = (*f).into(); }
            if *no_headers { opts.export.include_headers = false; }
        }
        _ => {}
    }
    Ok(opts)
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    crate::logging::init(crate::logging::level_for(cli.verbose, cli.quiet));
    let opts = resolve_options(&cli)?;

    let outcome = match &cli.command {
        Command::Apollo { .. } => scrape_cmd(Vendor::Apollo, &opts),
        Command::Lee { .. } => scrape_cmd(Vendor::Lee, &opts),
        Command::Rosco { .. } => scrape_cmd(Vendor::Rosco, &opts),
        Command::Compile { .. } => compile_cmd(&opts),
        Command::List { brands } => list_cmd(&opts, brands),
        Command::Show { id } => show_cmd(&opts, id),
        Command::Swatch { id, size, out } => swatch_cmd(&opts, id, *size, out),
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Lookup misses are an answer, not a crash
        Err(e) => match e.downcast_ref::<Error>() {
            Some(Error::NotFound(what)) => {
                error!("Not found: {what}");
                Ok(ExitCode::FAILURE)
            }
            _ => Err(e),
        },
    }
}

/* ---------- commands ---------- */

fn scrape_cmd(vendor: Vendor, opts: &PipelineOptions) -> Result<()> {
    let mut progress = LogProgress::new(vendor.label());
    let path = scrape::scrape_vendor(vendor, opts, Some(&mut progress))
        .wrap_err_with(|| format!("{} ingestion stopped", vendor.label()))?;
    info!("Raw {} data in {}", vendor.label(), path.display());
    Ok(())
}

fn compile_cmd(opts: &PipelineOptions) -> Result<()> {
    let out = store::compile(opts).wrap_err("Dataset not written")?;
    info!(
        "{} filters → {}, {}, {}",
        out.filters,
        out.schema.display(),
        out.dataset.display(),
        out.sheet.display()
    );
    Ok(())
}

fn load(opts: &PipelineOptions, brands: BrandFilter) -> Result<LightingFilters> {
    Ok(LightingFilters::load(opts.paths.dataset_path(), brands)?)
}

fn list_cmd(opts: &PipelineOptions, brands: &[String]) -> Result<()> {
    let filters = load(opts, BrandFilter::from_list(brands.to_vec()))?;
    for (id, f) in &filters {
        println!("{id}\t{}\t{}\t{}", f.brand, f.rgb.to_hex(), f.name);
    }
    info!("{} filters ({})", filters.len(), filters.brands().join(", "));
    Ok(())
}

fn show_cmd(opts: &PipelineOptions, id: &str) -> Result<()> {
    let filters = load(opts, BrandFilter::All)?;
    let f = filters.get(id)?;
    println!("{}", serde_json::to_string_pretty(&serde_json::json!({ id: f }))?);
    Ok(())
}

fn swatch_cmd(opts: &PipelineOptions, id: &str, size: u32, out: &str) -> Result<()> {
    let filters = load(opts, BrandFilter::All)?;
    let f = filters.get(id)?;
    let path = resolve_single_out_path(out, &format!("{id}.png"))?;
    swatch::save(f.rgb, size, Path::new(&path))?;
    info!("{} ({}) → {}", id, f.name, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lighting_filters").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&["--config", "/nonexistent.conf", "--raw-dir", "/tmp/raw", "compile", "--format", "tsv", "--no-headers"]);
        let opts = resolve_options(&cli).unwrap();
        assert_eq!(opts.paths.raw_dir, PathBuf::from("/tmp/raw"));
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert!(!opts.export.include_headers);
    }

    #[test]
    fn repeated_brands_and_swatch_defaults() {
        match parse(&["list", "--brand", "Lee", "--brand", "Apollo"]).command {
            Command::List { brands } => assert_eq!(brands, vec!["Lee", "Apollo"]),
            other => panic!("unexpected {other:?}"),
        }
        match parse(&["swatch", "R02"]).command {
            Command::Swatch { id, size, out } => {
                assert_eq!(id, "R02");
                assert_eq!(size, DEFAULT_SWATCH_SIZE);
                assert!(out.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn pause_applies_to_web_vendors() {
        let cli = parse(&["--config", "/nonexistent.conf", "lee", "--pause-ms", "250"]);
        assert_eq!(resolve_options(&cli).unwrap().scrape.request_pause_ms, 250);
    }
}
