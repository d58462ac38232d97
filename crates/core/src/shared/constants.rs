/// Side length, in pixels, of one grid cell.
pub const DEFAULT_GROUP_WIDTH: i32 = 7;

/// Regions smaller than this many cells are discarded before matching.
pub const DEFAULT_MIN_AREA: usize = 20;

/// Outline color for drawn faces (RGB).
pub const DEFAULT_OVERLAY_COLOR: [u8; 3] = [255, 0, 0];

pub const DEFAULT_OVERLAY_THICKNESS: u32 = 1;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

pub const SETTINGS_DIR_NAME: &str = "FaceOverlay";
pub const SETTINGS_FILE_NAME: &str = "detection.json";
