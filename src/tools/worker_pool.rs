use crate::config::CaptureConfig;
use anyhow::{Context, Result};
use log::debug;

/// 在執行緒池上跑到完成的工作
///
/// 工作內部沒有暫停點，只在固定檢查點輪詢取消旗標；
/// 結果經由各自的事件通道送出，提交端在 `spawn` 之前
/// 先保留 `Receiver` 與取消旗標的複本
pub trait WorkerTask: Send + 'static {
    fn run_task(self);
}

/// 工作執行緒池
///
/// 多個工作可同時執行並亂序完成；同一個批次工作內部
/// 仍是嚴格循序的
pub struct WorkerPool {
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    /// 建立執行緒池；`threads` 為 0 時由 rayon 依核心數決定
    pub fn new(threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("capture-worker-{index}"))
            .build()
            .context("無法建立工作執行緒池")?;

        debug!("工作執行緒池已建立，共 {} 條執行緒", pool.current_num_threads());
        Ok(Self { pool })
    }

    pub fn with_default_threads() -> Result<Self> {
        Self::new(0)
    }

    pub fn from_config(config: &CaptureConfig) -> Result<Self> {
        Self::new(config.worker_threads)
    }

    /// 提交一個工作；不阻塞，結果由工作自己的通道送出
    pub fn spawn<W: WorkerTask>(&self, worker: W) {
        self.pool.spawn(move || worker.run_task());
    }

    #[must_use]
    pub fn current_num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}
