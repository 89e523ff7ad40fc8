use crate::component::progress::ProgressEvent;
use crate::config::ProcessingOptions;
use crate::signal::CancelFlag;
use crate::tools::{
    Bitmap, CapturedFrame, FrameGuard, MapMode, RawFrame, WorkerTask, apply_processing,
};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, error, warn};
use thiserror::Error;

/// 影格擷取的失敗情況；都可由呼叫端復原（跳過該影格）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("無法映射影格記憶體以供讀取")]
    FrameMapFailed,
    #[error("影格無法轉換為影像（解碼結果為空）")]
    ImageConversionFailed,
    #[error("處理後的影像無法建立為顯示點陣圖")]
    BitmapBuildFailed,
}

/// 單張擷取工作的事件
///
/// 同一項作業絕不會在 `Error` 之後再發出 `FrameReady`；
/// 取消時兩者都不發出，只收尾一個 `Finished`
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    Progress(ProgressEvent),
    FrameReady(CapturedFrame),
    Error(CaptureError),
    Finished,
}

/// 單張影格擷取工作
///
/// 在一條池執行緒上跑到完成；取消旗標只在階段轉換前輪詢
pub struct CaptureWorker<F: RawFrame> {
    frame: F,
    timestamp: i64,
    source: String,
    options: ProcessingOptions,
    sender: Sender<CaptureEvent>,
    cancel: CancelFlag,
}

impl<F: RawFrame> CaptureWorker<F> {
    #[must_use]
    pub fn new(
        frame: F,
        timestamp: i64,
        source: impl Into<String>,
        options: ProcessingOptions,
        cancel: CancelFlag,
    ) -> (Self, Receiver<CaptureEvent>) {
        let (sender, receiver) = unbounded();
        (
            Self {
                frame,
                timestamp,
                source: source.into(),
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

    /// 執行擷取；`Ok(None)` 表示已取消
    pub fn run(self) -> Result<Option<Bitmap>, CaptureError> {
        let Self {
            frame,
            timestamp,
            source,
            options,
            sender,
            cancel,
        } = self;

        let result = process_frame(frame, timestamp, &source, &options, &sender, &cancel);
        match &result {
            Ok(Some(_)) => {}
            Ok(None) => warn!("影格處理已取消: {source} @ {timestamp}"),
            Err(e) => {
                error!("影格處理失敗: {source} @ {timestamp}: {e}");
                let _ = sender.send(CaptureEvent::Error(*e));
            }
        }
        let _ = sender.send(CaptureEvent::Finished);

        result
    }
}

impl<F: RawFrame + 'static> WorkerTask for CaptureWorker<F> {
    fn run_task(self) {
        let _ = self.run();
    }
}

fn process_frame<F: RawFrame>(
    frame: F,
    timestamp: i64,
    source: &str,
    options: &ProcessingOptions,
    sender: &Sender<CaptureEvent>,
    cancel: &CancelFlag,
) -> Result<Option<Bitmap>, CaptureError> {
    let progress = |percent: u8, message: &str| {
        let _ = sender.send(CaptureEvent::Progress(ProgressEvent::new(percent, message)));
    };

    progress(0, "開始處理影格");

    // 守衛建立後，任何離開路徑都會恰好 unmap 一次
    let mut guard = FrameGuard::new(frame);

    if cancel.is_cancelled() {
        return Ok(None);
    }
    if !guard.map(MapMode::ReadOnly) {
        return Err(CaptureError::FrameMapFailed);
    }
    progress(25, "已映射原始影格");

    if cancel.is_cancelled() {
        return Ok(None);
    }
    let image = guard.to_image().ok_or(CaptureError::ImageConversionFailed)?;
    progress(50, "已轉換為中介影像");

    if cancel.is_cancelled() {
        return Ok(None);
    }
    let processed = apply_processing(image, options);
    progress(75, "已套用影像處理");

    if cancel.is_cancelled() {
        return Ok(None);
    }
    let bitmap = Bitmap::from_dynamic(&processed);
    if bitmap.is_empty() {
        return Err(CaptureError::BitmapBuildFailed);
    }
    progress(100, "影格處理完成");

    let captured = CapturedFrame {
        bitmap: bitmap.clone(),
        timestamp,
        source: source.to_string(),
    };
    debug!("影格已就緒 [{}]: {source} @ {timestamp}", captured.cache_key());
    let _ = sender.send(CaptureEvent::FrameReady(captured));

    Ok(Some(bitmap))
}

/// 批次共用的單張演算法：沒有里程碑，也不在中途輪詢取消
pub(super) fn capture_one<F: RawFrame>(
    frame: F,
    options: &ProcessingOptions,
) -> Result<Bitmap, CaptureError> {
    let mut guard = FrameGuard::new(frame);

    if !guard.map(MapMode::ReadOnly) {
        return Err(CaptureError::FrameMapFailed);
    }
    let image = guard.to_image().ok_or(CaptureError::ImageConversionFailed)?;
    let processed = apply_processing(image, options);

    let bitmap = Bitmap::from_dynamic(&processed);
    if bitmap.is_empty() {
        return Err(CaptureError::BitmapBuildFailed);
    }
    Ok(bitmap)
}
