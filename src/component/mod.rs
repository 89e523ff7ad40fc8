//! 背景工作元件模組
//!
//! 每個子模組實現一種工作：影格擷取、縮圖產生與自動擷取控制；
//! 單項與批次變體共用同一套核心演算法

pub mod auto_capture;
pub mod capture;
pub mod progress;
pub mod thumbnail;

pub use auto_capture::{AutoCaptureController, AutoCaptureEvent};
pub use capture::{
    BatchCaptureEvent, BatchCaptureItem, BatchCaptureWorker, CaptureError, CaptureEvent,
    CaptureWorker,
};
pub use progress::ProgressEvent;
pub use thumbnail::{
    BatchThumbnailEvent, BatchThumbnailItem, BatchThumbnailWorker, ThumbnailError, ThumbnailEvent,
    ThumbnailWorker,
};
