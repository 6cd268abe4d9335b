//! Command-line entry point for lidar extraction.
//!
//! ```bash
//! lidar_extract path/to/archive.json path/to/output \
//!     --mat2to1 matrix2to1.txt --merge --format las --lidar3-reversed
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use lidar_extract::{
    ExtractError, ExtractionConfig, JsonArchive, LasSink, OutputFormat, OutputSink, ScanArchive,
    XyzSink,
};

#[derive(Parser, Debug)]
#[command(name = "lidar_extract", about = "Extract georeferenced point clouds from a scan archive")]
struct Cli {
    /// Path to the scan archive file
    archive: PathBuf,

    /// Path to the output folder (created if missing)
    output_dir: PathBuf,

    /// Path to a sensor 2-to-1 transformation matrix
    #[arg(long)]
    mat2to1: Option<PathBuf>,

    /// Path to a sensor 3-to-1 transformation matrix
    #[arg(long)]
    mat3to1: Option<PathBuf>,

    /// Merge sensors 2 and 3 into sensor 1's coordinate system
    #[arg(long)]
    merge: bool,

    /// Point cloud export format
    #[arg(long, value_enum, default_value = "las")]
    format: OutputFormat,

    /// Apply the reversed-mount correction for a sensor 3 mounted on the
    /// opposite side of the tray
    #[arg(long)]
    lidar3_reversed: bool,

    /// Display debug level logs
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let timer = Instant::now();

    // Configuration failures are fatal before any processing starts; data
    // errors are reported but the process still exits cleanly.
    match run(&cli) {
        Ok(()) => {}
        Err(err @ (ExtractError::InvalidConfiguration(_) | ExtractError::MalformedCalibration { .. })) => {
            log::error!("{}", err);
            log::error!("Lidar extraction failed");
            std::process::exit(2);
        }
        Err(err) => {
            log::error!("{}", err);
            log::error!("Lidar extraction of {} failed", cli.archive.display());
        }
    }

    log::info!(
        "Lidar extraction took {} seconds",
        timer.elapsed().as_secs()
    );
}

fn run(cli: &Cli) -> lidar_extract::Result<()> {
    log::info!("Reading archive '{}'...", cli.archive.display());
    fs::create_dir_all(&cli.output_dir)?;

    let archive = JsonArchive::open(&cli.archive)?;

    let sidecar = cli
        .output_dir
        .join(format!("uplot_{}_lidar_metadata.json", archive.plot_id()));
    log::debug!("Writing metadata sidecar {}", sidecar.display());
    lidar_extract::io::archive::write_metadata_sidecar(&sidecar, archive.metadata())?;

    let config = ExtractionConfig {
        merge: cli.merge,
        reversed_mount: cli.lidar3_reversed,
        output_format: cli.format,
        mat2to1: cli.mat2to1.clone(),
        mat3to1: cli.mat3to1.clone(),
        ..ExtractionConfig::default()
    };

    if config.reversed_mount {
        log::debug!("Sensor 3 is mounted on the opposite side of the tray");
    }

    let mut sink: Box<dyn OutputSink> = match config.output_format {
        OutputFormat::Las => Box::new(LasSink::new(&cli.output_dir)),
        OutputFormat::Xyz => Box::new(XyzSink::new(&cli.output_dir)),
    };
    lidar_extract::run_extraction(&archive, &config, sink.as_mut())
}
