use clap::{Parser, Subcommand};
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tabled::{Table, Tabled};
use timsrust::readers::FrameReader;
use timstic::errors::{Result, UnsupportedDataError};
use timstic::{
    AggregatedSeries, AnnotationRecord, DenseFrame, DisplayMode, FrameParameters,
    IntensityFrame, PlotModel, ScanRange, TicSettings, TicViewModel, TimsFrameView,
};
use tracing::subscriber::set_global_default;
use tracing::{info, instrument, warn};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_chrome::{ChromeLayerBuilder, FlushGuard};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
struct TicArgs {
    /// A bruker `.d` directory or a json dense frame.
    #[arg(short, long)]
    input: PathBuf,

    /// The path to the json file with the TIC settings.
    #[arg(short, long)]
    settings_path: PathBuf,

    /// The path to the output files.
    #[arg(short, long)]
    output_path: PathBuf,

    /// Frames to process, all of them if not given.
    #[arg(short, long)]
    frame_index: Vec<usize>,

    // Whether the output json should be pretty printed.
    #[arg(short, long)]
    pretty: bool,

    // Print the annotations as a table.
    #[arg(long)]
    show_table: bool,

    // Write a chrome trace of the run to the working directory.
    #[arg(long)]
    chrome_trace: bool,
}

#[derive(Parser, Debug)]
struct WriteTemplateArgs {
    /// The path to the output files.
    #[arg(short, long)]
    output_path: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the TIC of one or more frames.
    Tic(TicArgs),
    WriteTemplate(WriteTemplateArgs),
}

#[derive(Debug, Serialize)]
struct TicReport {
    frame_index: usize,
    scan_range: Option<ScanRange>,
    time_factor: f64,
    max_value: f64,
    tic: AggregatedSeries,
    annotations: Vec<AnnotationRecord>,
    plot: PlotModel,
}

#[derive(Tabled)]
struct AnnotationRow {
    frame: usize,
    label: String,
    #[tabled(rename = "scan")]
    center: String,
    #[tabled(rename = "label height")]
    height: String,
}

enum FrameSource {
    Bruker(FrameReader),
    Dense(DenseFrame),
}

impl FrameSource {
    #[instrument]
    fn open(path: &Path) -> Result<Self> {
        if path.is_dir() {
            let reader = FrameReader::new(path)?;
            info!("Opened {} with {} frames", path.display(), reader.len());
            return Ok(Self::Bruker(reader));
        }
        let frame: DenseFrame = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        Ok(Self::Dense(frame))
    }

    fn num_frames(&self) -> usize {
        match self {
            Self::Bruker(reader) => reader.len(),
            Self::Dense(_) => 1,
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let num_frames = self.num_frames();
        if index >= num_frames {
            return Err(UnsupportedDataError::FrameIndexOutOfBounds { index, num_frames }.into());
        }
        Ok(())
    }

    fn tic_report(&self, index: usize, settings: &TicSettings) -> Result<TicReport> {
        match self {
            Self::Bruker(reader) => {
                let frame = reader.get(index)?;
                tic_report(index, &TimsFrameView::new(&frame), settings)
            }
            Self::Dense(frame) => tic_report(index, frame, settings),
        }
    }
}

fn tic_report<F: IntensityFrame + ?Sized>(
    frame_index: usize,
    frame: &F,
    settings: &TicSettings,
) -> Result<TicReport> {
    let metadata = settings.instrument.resolve_scans(frame.num_scans());
    let mut view = TicViewModel::from_settings(settings, metadata, PlotModel::new());
    view.update_frame_data(Some(frame))?;

    let annotations = match view.find_peaks() {
        Ok(annotations) => annotations.to_vec(),
        Err(e) => {
            warn!("No peaks for frame {}: {}", frame_index, e);
            Vec::new()
        }
    };

    Ok(TicReport {
        frame_index,
        scan_range: view.scan_range(),
        time_factor: view.time_factor(),
        max_value: view.max_value(),
        tic: view.tic_data().clone(),
        annotations,
        plot: view.into_target(),
    })
}

fn init_tracing(chrome_trace: bool) -> Option<FlushGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let formatting_layer = BunyanFormattingLayer::new("timstic".into(), std::io::stdout);
    let (chrome_layer, guard) = if chrome_trace {
        let (layer, guard) = ChromeLayerBuilder::new().include_args(true).build();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
        .with(chrome_layer);

    set_global_default(subscriber).expect("Setting default subscriber failed");
    guard
}

fn main() -> Result<()> {
    let args = Args::parse();
    let chrome_trace = matches!(&args.command, Some(Commands::Tic(x)) if x.chrome_trace);
    let _guard = init_tracing(chrome_trace);

    match args.command {
        Some(Commands::Tic(args)) => main_tic(args),
        Some(Commands::WriteTemplate(args)) => main_write_template(args),
        None => {
            println!("No command provided");
            Ok(())
        }
    }
}

fn template_settings() -> TicSettings {
    TicSettings {
        instrument: FrameParameters {
            tenths_of_nanoseconds_per_bin: 10.0,
            scans: None,
        },
        scan_range: Some((0, 1000)),
        display_mode: DisplayMode::ScanIndex,
        ..TicSettings::default()
    }
}

/// A single mobility peak over 200 scans and 4 bins.
fn template_frame() -> Result<DenseFrame> {
    let rows: Vec<Vec<f64>> = (0..200)
        .map(|scan| {
            let x = scan as f64;
            let y = 1000.0 * (-0.5 * ((x - 100.0) / 5.0).powi(2)).exp();
            vec![y / 4.0; 4]
        })
        .collect();
    DenseFrame::from_rows(&rows)
}

fn main_write_template(args: WriteTemplateArgs) -> Result<()> {
    let settings_json = serde_json::to_string_pretty(&template_settings())?;
    let frame_json = serde_json::to_string_pretty(&template_frame()?)?;

    let put_path = args.output_path.as_path();
    std::fs::create_dir_all(put_path)?;
    println!("Writing to {}", put_path.display());
    let settings_path = put_path.join("tic_settings.json");
    let frame_path = put_path.join("example_frame.json");
    std::fs::write(&settings_path, settings_json)?;
    std::fs::write(&frame_path, frame_json)?;
    println!(
        "use as `timstic tic --pretty --output-path '.' --input {:#?} --settings-path {:#?}` (or pass a .d directory as input)",
        frame_path, settings_path,
    );
    Ok(())
}

#[instrument(skip_all)]
fn main_tic(args: TicArgs) -> Result<()> {
    let settings: TicSettings =
        serde_json::from_str(&std::fs::read_to_string(&args.settings_path)?)?;
    let source = FrameSource::open(&args.input)?;

    let frame_indices = if args.frame_index.is_empty() {
        (0..source.num_frames()).collect::<Vec<_>>()
    } else {
        args.frame_index
    };
    for &index in frame_indices.iter() {
        source.check_index(index)?;
    }

    let start = Instant::now();
    let reports = frame_indices
        .par_iter()
        .progress_count(frame_indices.len() as u64)
        .map(|&index| source.tic_report(index, &settings))
        .collect::<Result<Vec<_>>>()?;
    info!(
        "Built {} TICs in {:.2?}",
        reports.len(),
        start.elapsed()
    );

    if args.show_table {
        let rows = reports.iter().flat_map(|report| {
            report.annotations.iter().map(|x| AnnotationRow {
                frame: report.frame_index,
                label: x.label.clone(),
                center: format!("{:.2}", x.x),
                height: format!("{:.1}", x.y),
            })
        });
        println!("{}", Table::new(rows));
    }

    std::fs::create_dir_all(&args.output_path)?;
    let put_path = args.output_path.join("tic_results.json");
    println!("Writing to {}", put_path.display());

    let serialized = if args.pretty {
        println!("Pretty printing enabled");
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };
    std::fs::write(put_path, serialized)?;
    Ok(())
}
