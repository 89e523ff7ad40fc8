//! 影格擷取與縮圖處理子系統
//!
//! 將解碼後的影片影格轉換為可顯示的點陣圖、產生縮圖、
//! 批次處理多張影格、依間隔觸發自動擷取，並以 LRU 策略
//! 快取縮圖。影片解碼、視窗層與持久化皆為外部協作者，
//! 只透過 `tools::RawFrame` 與各工作元件的事件通道互動。

pub mod component;
pub mod config;
pub mod init;
pub mod signal;
pub mod tools;
