//! Batch CLI for geofence verification
//!
//! Scans media files, pairs them with a metadata tag dump, verifies each
//! capture coordinate against a boundary polygon, and writes the record
//! set as JSON or CSV. Can also annotate a standalone points file with
//! membership verdicts.

use clap::Parser;
use log::{info, warn, LevelFilter};
use serde::Deserialize;
use simplelog::{Config as LogConfig, SimpleLogger};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process;

use geofence_verify::{
    checksum::sha256_file,
    report::{annotate_points_file, filter_inside, write_csv, write_json, RecordRow},
    scan::scan_media,
    AssetInput, AssetRecord, MembershipEngine, MembershipMode, PipelineConfig, Polygon, Result,
    TagSet, VerificationPipeline, VerifyError,
};

/// Verify media capture coordinates against a geographic boundary
#[derive(Parser, Debug)]
#[command(name = "geofence-verify", version, about)]
struct Args {
    /// Media file or directory of media files to verify
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Boundary polygon JSON file (array of vertex objects)
    #[arg(long, short)]
    polygon: PathBuf,

    /// Tag dump JSON file pairing filenames with raw tag maps
    #[arg(long, short)]
    tags: Option<PathBuf>,

    /// Output path; format chosen by extension (.json or .csv).
    /// Prints JSON to stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Pipeline configuration JSON (tag keys, field keys, extensions)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Boundary membership mode
    #[arg(long, value_enum)]
    mode: Option<CliMode>,

    /// Emit only records verified inside the boundary
    #[arg(long)]
    filter: bool,

    /// Annotate this points JSON file instead of processing media
    #[arg(long)]
    points: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliMode {
    Inclusive,
    Exclusive,
}

impl From<CliMode> for MembershipMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Inclusive => MembershipMode::Inclusive,
            CliMode::Exclusive => MembershipMode::Exclusive,
        }
    }
}

/// One entry of the tag dump file
#[derive(Debug, Deserialize)]
struct DumpEntry {
    filename: String,
    #[serde(default)]
    checksum: Option<String>,
    #[serde(default)]
    tags: TagSet,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::init(level, LogConfig::default()).expect("logger init");

    if let Err(e) = run(&args) {
        log::error!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }

    let polygon = Polygon::from_json_file(&args.polygon, &config.polygon_keys)?;
    info!(
        "Loaded boundary polygon with {} vertices from {}",
        polygon.vertices().len(),
        args.polygon.display()
    );

    // Points mode: annotate a standalone points file and stop
    if let Some(points) = &args.points {
        let output = args.output.clone().ok_or_else(|| VerifyError::OutputWriteError {
            path: points.clone(),
            message: "--points requires --output".to_string(),
            source: None,
        })?;
        let engine = MembershipEngine::new(polygon);
        annotate_points_file(&engine, points, &output, &config.point_keys, config.mode)?;
        info!("Wrote annotated points to {}", output.display());
        return Ok(());
    }

    let input = args.input.as_ref().ok_or_else(|| VerifyError::InputReadError {
        path: PathBuf::from("."),
        message: "either --input or --points is required".to_string(),
        source: None,
    })?;

    let assets = collect_assets(input, args.tags.as_deref(), &config)?;
    info!("Processing {} assets", assets.len());

    let pipeline = VerificationPipeline::from_config(polygon, &config);
    let mut records = pipeline.process(&assets);

    if args.filter {
        let total = records.len();
        records = filter_inside(&records);
        info!(
            "{} of {} records verified inside the boundary",
            records.len(),
            total
        );
    }

    emit(&records, args.output.as_deref())
}

/// Pair scanned media files with their dump entries and checksums.
///
/// Dump entries with no matching file on disk are still processed, so a
/// dump produced on another machine verifies without the original media.
fn collect_assets(
    input: &Path,
    tags_path: Option<&Path>,
    config: &PipelineConfig,
) -> Result<Vec<AssetInput>> {
    let mut dump: HashMap<String, DumpEntry> = match tags_path {
        Some(path) => load_dump(path)?
            .into_iter()
            .map(|e| (basename(&e.filename), e))
            .collect(),
        None => HashMap::new(),
    };

    let mut assets = Vec::new();
    for file in scan_media(input, &config.extensions)? {
        let name = basename(&file.to_string_lossy());
        let entry = dump.remove(&name);

        let checksum = match entry.as_ref().and_then(|e| e.checksum.clone()) {
            Some(sum) => sum,
            None => sha256_file(&file)?,
        };

        assets.push(AssetInput {
            filename: file.to_string_lossy().into_owned(),
            checksum,
            tags: entry.map(|e| e.tags).unwrap_or_default(),
        });
    }

    // dump-only assets, in filename order for determinism
    let mut leftovers: Vec<DumpEntry> = dump.into_values().collect();
    leftovers.sort_by(|a, b| a.filename.cmp(&b.filename));
    for entry in leftovers {
        warn!("{}: listed in tag dump but not found on disk", entry.filename);
        assets.push(AssetInput {
            filename: entry.filename,
            checksum: entry.checksum.unwrap_or_default(),
            tags: entry.tags,
        });
    }

    Ok(assets)
}

fn load_dump(path: &Path) -> Result<Vec<DumpEntry>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| VerifyError::input_read(path, "cannot read tag dump", e))?;
    serde_json::from_str(&content)
        .map_err(|e| VerifyError::input_read(path, "invalid tag dump JSON", e))
}

fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

fn emit(records: &[AssetRecord], output: Option<&Path>) -> Result<()> {
    match output {
        None => {
            let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
            let json = serde_json::to_string_pretty(&rows).map_err(|e| {
                VerifyError::output_write(PathBuf::from("-"), "serialization failed", e)
            })?;
            println!("{json}");
            Ok(())
        }
        Some(path) => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_lowercase);
            match ext.as_deref() {
                Some("csv") => write_csv(records, path)?,
                Some("json") | Some("txt") => write_json(records, path)?,
                _ => {
                    return Err(VerifyError::OutputWriteError {
                        path: path.to_path_buf(),
                        message: "unsupported output format (use .json, .txt, or .csv)"
                            .to_string(),
                        source: None,
                    })
                }
            }
            info!("Wrote {} records to {}", records.len(), path.display());
            Ok(())
        }
    }
}
