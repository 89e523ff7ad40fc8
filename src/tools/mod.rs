//! 共用工具模組
//!
//! 影像轉換、點陣圖與影格抽象、LRU 快取、執行緒池與時間點規劃

mod bitmap;
mod frame;
mod image_transform;
mod lru_cache;
mod thumbnail_cache;
mod timestamp_planner;
mod worker_pool;

pub use bitmap::{Bitmap, CapturedFrame, ProcessedImage, thumbnail_cache_key};
pub use frame::{FrameGuard, FrameProbe, MapMode, MemoryFrame, RawFrame};
pub use image_transform::{
    AspectMode, ScaleFilter, add_background, add_border, apply_processing, scale_to,
};
pub use lru_cache::LruCache;
pub use thumbnail_cache::{CacheEntry, CacheStats, ThumbnailCache};
pub use timestamp_planner::plan_uniform_timestamps;
pub use worker_pool::{WorkerPool, WorkerTask};
