use image::{DynamicImage, RgbaImage};
use std::sync::Arc;

/// 處理中的中介影像，工作元件內部使用，轉為點陣圖後即丟棄
pub type ProcessedImage = DynamicImage;

/// 跨越工作元件與消費端邊界的顯示點陣圖
///
/// 像素資料以 `Arc` 共享，`clone` 成本低；快取回傳的也是
/// 這種共享握把，呼叫端無法藉此改動快取內容
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap(Arc<RgbaImage>);

impl Default for Bitmap {
    fn default() -> Self {
        Self(Arc::new(RgbaImage::new(0, 0)))
    }
}

impl Bitmap {
    #[must_use]
    pub fn new(image: RgbaImage) -> Self {
        Self(Arc::new(image))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self::new(image.to_rgba8())
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// 寬或高為 0 即視為空點陣圖
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.width() == 0 || self.0.height() == 0
    }

    /// 估計的記憶體佔用（RGBA，每像素 4 位元組）
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.0.width() as usize * self.0.height() as usize * 4
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.0
    }
}

/// 擷取結果
///
/// 工作可能亂序完成，消費端一律以 `(timestamp, source)`
/// 關聯結果，不得依賴提交順序
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub bitmap: Bitmap,
    pub timestamp: i64,
    pub source: String,
}

impl CapturedFrame {
    /// 快取標籤：`(來源, 時間戳)` 的 blake3 短摘要
    #[must_use]
    pub fn cache_key(&self) -> String {
        thumbnail_cache_key(&self.source, self.timestamp)
    }
}

/// 計算縮圖快取鍵
#[must_use]
pub fn thumbnail_cache_key(source: &str, timestamp: i64) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(source.as_bytes());
    hasher.update(&timestamp.to_le_bytes());
    hasher.finalize().to_hex()[..16].to_string()
}
