use crate::config::types::CaptureConfig;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

impl CaptureConfig {
    /// 從 JSON 檔載入設定；檔案不存在時回傳預設值
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("設定檔不存在，使用預設值: {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("無法讀取設定檔: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("無法解析設定檔: {}", path.display()))
    }
}
