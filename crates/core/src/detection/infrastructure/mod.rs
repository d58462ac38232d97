pub mod contour_region_extractor;
pub mod tone_face_detector;
