//! 自動擷取控制元件
//!
//! 依牆鐘時間間隔決定何時發出擷取請求的小型狀態機

mod main;

pub use main::{
    AutoCaptureController, AutoCaptureEvent, DEFAULT_INTERVAL_SECONDS, MIN_INTERVAL_SECONDS,
};
