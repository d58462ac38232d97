use std::path::PathBuf;

/// Describes a frame source once it has been opened.
///
/// `total_frames` is the number of frames the source expects to yield; a
/// single image is a one-frame source.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub total_frames: usize,
    pub source_path: Option<PathBuf>,
}
