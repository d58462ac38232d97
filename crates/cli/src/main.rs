use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use faceoverlay_core::detection::domain::detection_config::DetectionConfig;
use faceoverlay_core::detection::domain::face_detector::FaceDetector;
use faceoverlay_core::detection::infrastructure::tone_face_detector::ToneFaceDetector;
use faceoverlay_core::pipeline::annotate_image_use_case::AnnotateImageUseCase;
use faceoverlay_core::pipeline::annotate_sequence_use_case::{
    AnnotateSequenceUseCase, ProgressCallback,
};
use faceoverlay_core::pipeline::detection_report::{write_report, FrameDetections};
use faceoverlay_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use faceoverlay_core::rendering::domain::overlay_renderer::OverlayRenderer;
use faceoverlay_core::rendering::infrastructure::rectangle_overlay_renderer::{
    RectangleOverlayRenderer,
};
use faceoverlay_core::shared::color::Color;
use faceoverlay_core::shared::constants::DEFAULT_OVERLAY_COLOR;
use faceoverlay_core::video::domain::video_reader::VideoReader;
use faceoverlay_core::video::infrastructure::image_file_reader::ImageFileReader;
use faceoverlay_core::video::infrastructure::image_file_writer::ImageFileWriter;
use faceoverlay_core::video::infrastructure::image_sequence_reader::{
    has_image_extension, ImageSequenceReader,
};

/// Outlines skin/hair tone face candidates in images and frame sequences.
#[derive(Parser)]
#[command(name = "faceoverlay")]
struct Cli {
    /// Input image file, or a directory of frames.
    input: PathBuf,

    /// Output image file, or output directory when the input is a directory.
    output: PathBuf,

    /// Grid cell side length in pixels.
    #[arg(long, allow_hyphen_values = true)]
    group_width: Option<i32>,

    /// Minimum region area, in grid cells.
    #[arg(long)]
    min_area: Option<usize>,

    /// Detection config JSON (defaults to the per-user config).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Outline thickness in pixels.
    #[arg(long, default_value = "1")]
    thickness: u32,

    /// Write detected boxes per frame to this JSON file.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Stop after this many frames (directory input only).
    #[arg(long)]
    max_frames: Option<usize>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = build_config(&cli)?;
    log::info!(
        "Detecting with group width {}, min area {}",
        config.group_width,
        config.min_area
    );
    let detector: Box<dyn FaceDetector> = Box::new(ToneFaceDetector::new(config)?);
    let renderer: Box<dyn OverlayRenderer> = Box::new(RectangleOverlayRenderer::new(
        Color::from(DEFAULT_OVERLAY_COLOR),
        cli.thickness,
    ));

    let detections = if cli.input.is_dir() {
        run_sequence(&cli.input, &cli.output, cli.max_frames, detector, renderer)?
    } else {
        run_image(&cli.input, &cli.output, detector, renderer)?
    };

    if let Some(report) = &cli.report {
        write_report(report, &detections)?;
        log::info!("Report written to {}", report.display());
    }
    Ok(())
}

fn run_image(
    input: &Path,
    output: &Path,
    detector: Box<dyn FaceDetector>,
    renderer: Box<dyn OverlayRenderer>,
) -> Result<Vec<FrameDetections>, Box<dyn std::error::Error>> {
    let mut use_case = AnnotateImageUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(ImageFileWriter::new()),
        detector,
        renderer,
    );
    let faces = use_case.execute(input, output)?;
    log::info!("Output written to {}", output.display());
    Ok(vec![FrameDetections { frame: 0, faces }])
}

fn run_sequence(
    input: &Path,
    output_dir: &Path,
    max_frames: Option<usize>,
    detector: Box<dyn FaceDetector>,
    renderer: Box<dyn OverlayRenderer>,
) -> Result<Vec<FrameDetections>, Box<dyn std::error::Error>> {
    let mut reader: Box<dyn VideoReader> = Box::new(ImageSequenceReader::new());
    let metadata = reader.open(input)?;

    let progress: ProgressCallback = Box::new(|current, total| {
        eprint!("\rProcessing frame {current}/{total}");
        true
    });

    let use_case = AnnotateSequenceUseCase::new(
        reader,
        Box::new(ImageFileWriter::new()),
        detector,
        renderer,
        Box::new(StdoutPipelineLogger::default()),
        Some(progress),
        max_frames,
    );
    let detections = use_case.execute(&metadata, output_dir)?;
    eprintln!();

    let faces: usize = detections.iter().map(|d| d.faces.len()).sum();
    log::info!(
        "Found {faces} face(s) across {} frames; output written to {}",
        detections.len(),
        output_dir.display()
    );
    Ok(detections)
}

/// Config file (or per-user config) with command-line overrides applied.
fn build_config(cli: &Cli) -> Result<DetectionConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => DetectionConfig::from_file(path)?,
        None => DetectionConfig::load(),
    };
    if let Some(group_width) = cli.group_width {
        config.group_width = group_width;
    }
    if let Some(min_area) = cli.min_area {
        config.min_area = min_area;
    }
    config.validate()?;
    Ok(config)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input not found: {}", cli.input.display()).into());
    }
    if cli.input.is_file() && !has_image_extension(&cli.input) {
        return Err(format!("Unsupported image format: {}", cli.input.display()).into());
    }
    if cli.input.is_file() && !has_image_extension(&cli.output) {
        return Err(format!(
            "Output must be an image file when the input is an image, got {}",
            cli.output.display()
        )
        .into());
    }
    if cli.thickness == 0 {
        return Err("Thickness must be at least 1".into());
    }
    if cli.max_frames == Some(0) {
        return Err("--max-frames must be at least 1".into());
    }
    Ok(())
}
