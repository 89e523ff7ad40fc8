use super::main::{CaptureError, capture_one};
use crate::config::ProcessingOptions;
use crate::signal::CancelFlag;
use crate::tools::{CapturedFrame, RawFrame, WorkerTask};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info, warn};

/// 批次擷取的一個項目
pub struct BatchCaptureItem<F: RawFrame> {
    pub frame: F,
    pub timestamp: i64,
    pub source: String,
}

/// 批次擷取工作的事件
#[derive(Debug, Clone)]
pub enum BatchCaptureEvent {
    /// 在每個項目開始前發出
    Progress {
        index: usize,
        total: usize,
        message: String,
    },
    FrameReady(CapturedFrame),
    Error { index: usize, error: CaptureError },
    /// 收尾事件，帶著實際成功處理的項目數
    Finished { processed: usize },
}

/// 批次影格擷取工作
///
/// 在單一池執行緒上依列表順序逐項處理；取消旗標只在
/// 項目之間輪詢，處理中的項目會先正常完成或失敗。
/// 單項失敗不會中斷批次
pub struct BatchCaptureWorker<F: RawFrame> {
    items: Vec<BatchCaptureItem<F>>,
    options: ProcessingOptions,
    sender: Sender<BatchCaptureEvent>,
    cancel: CancelFlag,
}

impl<F: RawFrame> BatchCaptureWorker<F> {
    #[must_use]
    pub fn new(
        items: Vec<BatchCaptureItem<F>>,
        options: ProcessingOptions,
        cancel: CancelFlag,
    ) -> (Self, Receiver<BatchCaptureEvent>) {
        let (sender, receiver) = unbounded();
        (
            Self {
                items,
                options,
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

    /// 執行批次；回傳成功處理的項目數（空列表為 0，不是錯誤）
    pub fn run(self) -> usize {
        let Self {
            items,
            options,
            sender,
            cancel,
        } = self;

        let total = items.len();
        let mut processed = 0;
        info!("開始批次影格處理，共 {total} 個影格");

        for (index, item) in items.into_iter().enumerate() {
            if cancel.is_cancelled() {
                warn!("收到取消請求，停止批次影格處理");
                break;
            }

            let _ = sender.send(BatchCaptureEvent::Progress {
                index,
                total,
                message: format!("正在處理影格 {}/{total}", index + 1),
            });

            match capture_one(item.frame, &options) {
                Ok(bitmap) => {
                    processed += 1;
                    let _ = sender.send(BatchCaptureEvent::FrameReady(CapturedFrame {
                        bitmap,
                        timestamp: item.timestamp,
                        source: item.source,
                    }));
                }
                Err(error) => {
                    debug!("批次影格 {} 處理失敗: {error}", index + 1);
                    let _ = sender.send(BatchCaptureEvent::Error { index, error });
                }
            }
        }

        info!("批次影格處理結束: 成功 {processed}/{total}");
        let _ = sender.send(BatchCaptureEvent::Finished { processed });
        processed
    }
}

impl<F: RawFrame + 'static> WorkerTask for BatchCaptureWorker<F> {
    fn run_task(self) {
        let _ = self.run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{MapMode, MemoryFrame};
    use image::{DynamicImage, Rgba, RgbaImage};

    fn image() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 12, Rgba([7, 7, 7, 255])))
    }

    fn item(frame: MemoryFrame, timestamp: i64) -> BatchCaptureItem<MemoryFrame> {
        BatchCaptureItem {
            frame,
            timestamp,
            source: format!("/video/item-{timestamp}.mp4"),
        }
    }

    #[test]
    fn test_failed_item_does_not_abort_batch() {
        // 第 3 項（索引 2）無法映射，其餘正常
        let items = vec![
            item(MemoryFrame::new(image()), 100),
            item(MemoryFrame::new(image()), 200),
            item(MemoryFrame::unmappable(), 300),
            item(MemoryFrame::new(image()), 400),
            item(MemoryFrame::new(image()), 500),
        ];

        let (worker, receiver) =
            BatchCaptureWorker::new(items, ProcessingOptions::default(), CancelFlag::new());
        let processed = worker.run();
        assert_eq!(processed, 4);

        let events: Vec<_> = receiver.try_iter().collect();
        let ready_timestamps: Vec<i64> = events
            .iter()
            .filter_map(|e| match e {
                BatchCaptureEvent::FrameReady(f) => Some(f.timestamp),
                _ => None,
            })
            .collect();
        assert_eq!(ready_timestamps, vec![100, 200, 400, 500]);

        let errors: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                BatchCaptureEvent::Error { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(errors, vec![2]);

        assert!(matches!(
            events.last(),
            Some(BatchCaptureEvent::Finished { processed: 4 })
        ));
    }

    #[test]
    fn test_empty_batch_reports_zero() {
        let (worker, receiver) = BatchCaptureWorker::<MemoryFrame>::new(
            Vec::new(),
            ProcessingOptions::default(),
            CancelFlag::new(),
        );

        assert_eq!(worker.run(), 0);

        let events: Vec<_> = receiver.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            BatchCaptureEvent::Finished { processed: 0 }
        ));
    }

    /// 在 `map` 時設定取消旗標的影格，模擬項目處理中途送達的取消
    struct CancelOnMapFrame {
        image: DynamicImage,
        cancel: Option<CancelFlag>,
        mapped: bool,
    }

    impl RawFrame for CancelOnMapFrame {
        fn map(&mut self, _mode: MapMode) -> bool {
            if let Some(cancel) = &self.cancel {
                cancel.cancel();
            }
            self.mapped = true;
            true
        }

        fn unmap(&mut self) {
            self.mapped = false;
        }

        fn to_image(&self) -> Option<DynamicImage> {
            self.mapped.then(|| self.image.clone())
        }
    }

    #[test]
    fn test_cancellation_between_items() {
        let cancel = CancelFlag::new();
        let frame = |trigger: bool| CancelOnMapFrame {
            image: image(),
            cancel: trigger.then(|| cancel.clone()),
            mapped: false,
        };

        // 取消在第 2 項處理中觸發：第 2 項仍正常完成，第 3 項起不再開始
        let items = vec![
            BatchCaptureItem { frame: frame(false), timestamp: 1, source: "a".into() },
            BatchCaptureItem { frame: frame(true), timestamp: 2, source: "b".into() },
            BatchCaptureItem { frame: frame(false), timestamp: 3, source: "c".into() },
            BatchCaptureItem { frame: frame(false), timestamp: 4, source: "d".into() },
            BatchCaptureItem { frame: frame(false), timestamp: 5, source: "e".into() },
        ];

        let (worker, receiver) =
            BatchCaptureWorker::new(items, ProcessingOptions::default(), cancel.clone());
        let processed = worker.run();
        assert_eq!(processed, 2);

        let events: Vec<_> = receiver.try_iter().collect();
        let touched: Vec<i64> = events
            .iter()
            .filter_map(|e| match e {
                BatchCaptureEvent::FrameReady(f) => Some(f.timestamp),
                _ => None,
            })
            .collect();
        assert_eq!(touched, vec![1, 2]);
        assert!(!events
            .iter()
            .any(|e| matches!(e, BatchCaptureEvent::Error { .. })));
        assert!(matches!(
            events.last(),
            Some(BatchCaptureEvent::Finished { processed: 2 })
        ));
    }
}
