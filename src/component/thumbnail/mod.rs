//! 縮圖產生元件
//!
//! 以已處理好的點陣圖為輸入，縮放、合成背景並加上邊框。
//! 保持長寬比且設定背景色時，輸出必為要求的精確尺寸
//! （letterbox / pillarbox 填充）

mod batch;
mod main;

pub use batch::{BatchThumbnailEvent, BatchThumbnailItem, BatchThumbnailWorker};
pub use main::{ThumbnailError, ThumbnailEvent, ThumbnailWorker};
