use super::main::{ThumbnailError, render_thumbnail};
use crate::config::{Size, ThumbnailQualitySettings};
use crate::signal::CancelFlag;
use crate::tools::{Bitmap, CapturedFrame, WorkerTask};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info, warn};

/// 批次縮圖的一個項目
#[derive(Debug, Clone)]
pub struct BatchThumbnailItem {
    pub bitmap: Bitmap,
    pub timestamp: i64,
    pub source: String,
}

/// 批次縮圖工作的事件
#[derive(Debug, Clone)]
pub enum BatchThumbnailEvent {
    /// 在每個項目開始前發出
    Progress {
        index: usize,
        total: usize,
        message: String,
    },
    ThumbnailReady(CapturedFrame),
    Error { index: usize, error: ThumbnailError },
    /// 收尾事件，帶著實際成功處理的項目數
    Finished { processed: usize },
}

/// 批次縮圖產生工作
///
/// 與批次擷取相同的循序模型：項目之間輪詢取消，
/// 單項失敗記錄後繼續下一項
pub struct BatchThumbnailWorker {
    items: Vec<BatchThumbnailItem>,
    target_size: Size,
    quality: ThumbnailQualitySettings,
    sender: Sender<BatchThumbnailEvent>,
    cancel: CancelFlag,
}

impl BatchThumbnailWorker {
    #[must_use]
    pub fn new(
        items: Vec<BatchThumbnailItem>,
        target_size: Size,
        quality: ThumbnailQualitySettings,
        cancel: CancelFlag,
    ) -> (Self, Receiver<BatchThumbnailEvent>) {
        let (sender, receiver) = unbounded();
        (
            Self {
                items,
                target_size,
                quality,
                sender,
                cancel,
            },
            receiver,
        )
    }

    #[must_use]
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// 執行批次；回傳成功處理的項目數
    pub fn run(self) -> usize {
        let Self {
            items,
            target_size,
            quality,
            sender,
            cancel,
        } = self;

        let total = items.len();
        let mut processed = 0;
        info!("開始批次縮圖產生，共 {total} 張");

        for (index, item) in items.into_iter().enumerate() {
            if cancel.is_cancelled() {
                warn!("收到取消請求，停止批次縮圖產生");
                break;
            }

            let _ = sender.send(BatchThumbnailEvent::Progress {
                index,
                total,
                message: format!("正在產生縮圖 {}/{total}", index + 1),
            });

            match render_thumbnail(&item.bitmap, target_size, &quality) {
                Ok(thumbnail) => {
                    processed += 1;
                    let _ = sender.send(BatchThumbnailEvent::ThumbnailReady(CapturedFrame {
                        bitmap: thumbnail,
                        timestamp: item.timestamp,
                        source: item.source,
                    }));
                }
                Err(error) => {
                    debug!("批次縮圖 {} 產生失敗: {error}", index + 1);
                    let _ = sender.send(BatchThumbnailEvent::Error { index, error });
                }
            }
        }

        info!("批次縮圖產生結束: 成功 {processed}/{total}");
        let _ = sender.send(BatchThumbnailEvent::Finished { processed });
        processed
    }
}

impl WorkerTask for BatchThumbnailWorker {
    fn run_task(self) {
        let _ = self.run();
    }
}
