use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::detection::domain::face_detector::FaceDetector;
use crate::pipeline::detection_report::FrameDetections;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::rendering::domain::overlay_renderer::OverlayRenderer;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::VideoReader;

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Called after every frame with `(processed, total)`; returning `false`
/// stops the run before the next frame.
pub type ProgressCallback = Box<dyn Fn(usize, usize) -> bool + Send>;

pub fn frame_file_name(index: usize) -> String {
    format!("frame_{index:06}.png")
}

/// Frame-sequence pipeline: read → detect → draw → write, one frame at a time.
///
/// Layout: `reader thread → main [detect/draw] → writer thread`. Each frame is
/// detected independently. Unreadable frames are logged and skipped.
pub struct AnnotateSequenceUseCase {
    reader: Box<dyn VideoReader>,
    image_writer: Box<dyn ImageWriter>,
    detector: Box<dyn FaceDetector>,
    renderer: Box<dyn OverlayRenderer>,
    logger: Box<dyn PipelineLogger>,
    on_progress: Option<ProgressCallback>,
    max_frames: Option<usize>,
}

impl AnnotateSequenceUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        image_writer: Box<dyn ImageWriter>,
        detector: Box<dyn FaceDetector>,
        renderer: Box<dyn OverlayRenderer>,
        logger: Box<dyn PipelineLogger>,
        on_progress: Option<ProgressCallback>,
        max_frames: Option<usize>,
    ) -> Self {
        Self {
            reader,
            image_writer,
            detector,
            renderer,
            logger,
            on_progress,
            max_frames,
        }
    }

    /// Runs the pipeline over an already opened reader, writing annotated
    /// frames into `output_dir`. Returns the detections of every processed
    /// frame in order.
    pub fn execute(
        self,
        metadata: &VideoMetadata,
        output_dir: &Path,
    ) -> Result<Vec<FrameDetections>, Box<dyn std::error::Error>> {
        let Self {
            reader,
            image_writer,
            mut detector,
            renderer,
            mut logger,
            on_progress,
            max_frames,
        } = self;

        let limit = max_frames.unwrap_or(usize::MAX);
        let total = metadata.total_frames.min(limit);
        let cancelled = Arc::new(AtomicBool::new(false));

        let (frame_tx, frame_rx) =
            crossbeam_channel::bounded::<Result<Frame, SendError>>(DEFAULT_CHANNEL_CAPACITY);
        let (write_tx, write_rx) =
            crossbeam_channel::bounded::<(PathBuf, Frame)>(DEFAULT_CHANNEL_CAPACITY);

        let reader_handle = spawn_reader(reader, frame_tx, limit, cancelled.clone());
        let writer_handle = spawn_writer(image_writer, write_rx);

        let mut stage = MainLoop {
            detector: detector.as_mut(),
            renderer: renderer.as_ref(),
            logger: logger.as_mut(),
            on_progress: on_progress.as_ref(),
            cancelled: &cancelled,
            output_dir,
            total,
        };
        let main_result = stage.run(frame_rx, write_tx);

        if reader_handle.join().is_err() {
            return Err("reader thread panicked".into());
        }
        match writer_handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e.to_string().into()),
            Err(_) => return Err("writer thread panicked".into()),
        }

        let detections = main_result?;
        logger.summary();
        Ok(detections)
    }
}

fn spawn_reader(
    mut reader: Box<dyn VideoReader>,
    frame_tx: crossbeam_channel::Sender<Result<Frame, SendError>>,
    limit: usize,
    cancelled: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for frame_result in reader.frames().take(limit) {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let mapped = frame_result.map_err(|e| -> SendError { e.to_string().into() });
            if frame_tx.send(mapped).is_err() {
                break;
            }
        }
        reader.close();
    })
}

fn spawn_writer(
    writer: Box<dyn ImageWriter>,
    write_rx: crossbeam_channel::Receiver<(PathBuf, Frame)>,
) -> std::thread::JoinHandle<Result<(), SendError>> {
    std::thread::spawn(move || {
        for (path, frame) in write_rx {
            writer
                .write(&path, &frame)
                .map_err(|e| -> SendError { e.to_string().into() })?;
        }
        Ok(())
    })
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

struct MainLoop<'a> {
    detector: &'a mut dyn FaceDetector,
    renderer: &'a dyn OverlayRenderer,
    logger: &'a mut dyn PipelineLogger,
    on_progress: Option<&'a ProgressCallback>,
    cancelled: &'a AtomicBool,
    output_dir: &'a Path,
    total: usize,
}

impl MainLoop<'_> {
    /// Consumes both channel ends so the threads see hang-ups once this returns.
    fn run(
        &mut self,
        frame_rx: crossbeam_channel::Receiver<Result<Frame, SendError>>,
        write_tx: crossbeam_channel::Sender<(PathBuf, Frame)>,
    ) -> Result<Vec<FrameDetections>, Box<dyn std::error::Error>> {
        let mut detections = Vec::new();
        let mut processed = 0;

        for frame_result in frame_rx {
            processed += 1;
            match frame_result {
                Ok(frame) => {
                    let entry = self.process(frame, &write_tx)?;
                    detections.push(entry);
                }
                Err(e) => log::warn!("Skipping unreadable frame: {e}"),
            }

            self.logger.progress(processed, self.total);
            if let Some(callback) = self.on_progress {
                if !callback(processed, self.total) {
                    self.cancelled.store(true, Ordering::Relaxed);
                    log::info!("Stopped after {processed} frames");
                    break;
                }
            }
        }

        Ok(detections)
    }

    fn process(
        &mut self,
        mut frame: Frame,
        write_tx: &crossbeam_channel::Sender<(PathBuf, Frame)>,
    ) -> Result<FrameDetections, Box<dyn std::error::Error>> {
        let start = Instant::now();
        let faces = self.detector.detect(&frame)?;
        self.logger.timing("detect", elapsed_ms(start));
        self.logger.metric("faces", faces.len() as f64);

        let start = Instant::now();
        self.renderer.draw(&mut frame, &faces)?;
        self.logger.timing("draw", elapsed_ms(start));

        let index = frame.index();
        if frame.is_empty() {
            log::warn!("Frame {index} is empty; nothing to write");
        } else {
            let path = self.output_dir.join(frame_file_name(index));
            if write_tx.send((path, frame)).is_err() {
                return Err("image writer stopped".into());
            }
        }

        Ok(FrameDetections {
            frame: index,
            faces,
        })
    }
}
