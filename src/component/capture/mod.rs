//! 影格擷取元件
//!
//! 將外部管線解碼出的原始影格轉換為可顯示的點陣圖。
//! 單張流程：映射 → 轉換 → 處理 → 建立點陣圖，
//! 每個階段之間輪詢取消旗標並發出進度里程碑；
//! 批次流程對有序列表逐項套用同一演算法

mod batch;
mod main;

pub use batch::{BatchCaptureEvent, BatchCaptureItem, BatchCaptureWorker};
pub use main::{CaptureError, CaptureEvent, CaptureWorker};
