pub mod load;
pub mod save;
pub mod types;

pub use save::save_config;
pub use types::{
    CaptureConfig, Color, DEFAULT_THUMBNAIL_SIZE, PixelFormat, ProcessingOptions, Size,
    ThumbnailQualitySettings,
};
