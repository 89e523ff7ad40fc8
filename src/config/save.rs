use crate::config::types::CaptureConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 將設定寫入 JSON 檔
pub fn save_config(config: &CaptureConfig, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(config).context("無法序列化設定")?;

    fs::write(path, content)
        .with_context(|| format!("無法寫入設定檔: {}", path.display()))?;

    Ok(())
}
