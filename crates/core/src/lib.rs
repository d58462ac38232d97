pub mod shared {
    pub mod bounding_box;
    pub mod color;
    pub mod constants;
    pub mod frame;
    pub mod video_metadata;
}

pub mod detection {
    pub mod domain {
        pub mod detection_config;
        pub mod face_detector;
        pub mod pixel_classifier;
        pub mod region_extractor;
        pub mod region_matcher;
        pub mod tone_grid;
    }
    pub mod infrastructure;
}

pub mod video {
    pub mod domain {
        pub mod image_writer;
        pub mod video_reader;
    }
    pub mod infrastructure {
        pub mod image_file_reader;
        pub mod image_file_writer;
        pub mod image_sequence_reader;
    }
}

pub mod rendering {
    pub mod domain {
        pub mod overlay_renderer;
    }
    pub mod infrastructure {
        pub mod rectangle_overlay_renderer;
    }
}

pub mod pipeline {
    pub mod annotate_image_use_case;
    pub mod annotate_sequence_use_case;
    pub mod detection_report;
    pub mod pipeline_logger;
}

pub use detection::infrastructure::tone_face_detector::detect_faces;
