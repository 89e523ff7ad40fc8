use serde::{Deserialize, Serialize};

/// 預設縮圖尺寸
pub const DEFAULT_THUMBNAIL_SIZE: Size = Size::new(160, 120);

/// 自動擷取間隔預設值（秒）
pub const DEFAULT_AUTO_CAPTURE_INTERVAL: f64 = 5.0;

/// 縮圖快取預設容量（筆數）
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// 像素尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 寬或高為 0 即視為無效尺寸
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// RGBA 顏色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// 縮圖邊框預設色 (#cccccc)
    pub const LIGHT_GRAY: Self = Self::rgb(0xcc, 0xcc, 0xcc);
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }
}

/// 目標像素格式
///
/// 平面影片格式（NV12、YUV420）無法表示為顯示點陣圖，
/// 指定時會被忽略而非視為錯誤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    Rgba8,
    Rgb8,
    Luma8,
    Nv12,
    Yuv420,
}

impl PixelFormat {
    #[must_use]
    pub const fn is_displayable(self) -> bool {
        matches!(self, Self::Rgba8 | Self::Rgb8 | Self::Luma8)
    }
}

/// 影格處理選項
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingOptions {
    pub scale_factor: f64,
    pub target_format: Option<PixelFormat>,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            target_format: None,
        }
    }
}

/// 縮圖品質設定
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailQualitySettings {
    pub smooth_scaling: bool,
    pub keep_aspect_ratio: bool,
    pub background_color: Option<Color>,
    pub border_width: u32,
    pub border_color: Color,
}

impl Default for ThumbnailQualitySettings {
    fn default() -> Self {
        Self {
            smooth_scaling: true,
            keep_aspect_ratio: true,
            background_color: None,
            border_width: 0,
            border_color: Color::LIGHT_GRAY,
        }
    }
}

/// 擷取子系統整體設定
///
/// 供內嵌應用程式持久化；各元件以 `from_config` 風格的
/// 建構子取用自己的欄位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub processing: ProcessingOptions,
    pub thumbnail_size: Size,
    pub thumbnail_quality: ThumbnailQualitySettings,
    pub auto_capture_interval_seconds: f64,
    pub cache_capacity: usize,
    /// 0 表示交由執行緒池自行決定
    pub worker_threads: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            processing: ProcessingOptions::default(),
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            thumbnail_quality: ThumbnailQualitySettings::default(),
            auto_capture_interval_seconds: DEFAULT_AUTO_CAPTURE_INTERVAL,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            worker_threads: 0,
        }
    }
}
