use crate::component::progress::ProgressEvent;
use crate::config::{Size, ThumbnailQualitySettings};
use crate::signal::CancelFlag;
use crate::tools::{
    AspectMode, Bitmap, CapturedFrame, ScaleFilter, WorkerTask, add_background, add_border,
    scale_to,
};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{error, warn};
use thiserror::Error;

/// 縮圖產生的失敗情況；兩者都在任何處理開始前就偵測
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ThumbnailError {
    #[error("來源點陣圖為空，無法產生縮圖")]
    NullSourceImage,
    #[error("縮圖目標尺寸無效: {width}x{height}")]
    InvalidTargetSize { width: u32, height: u32 },
}

/// 單張縮圖工作的事件
#[derive(Debug, Clone)]
pub enum ThumbnailEvent {
    Progress(ProgressEvent),
    ThumbnailReady(CapturedFrame),
    Error(ThumbnailError),
    Finished,
}

/// 單張縮圖產生工作
///
/// 前置條件在發出任何進度事件之前檢查：目標尺寸不得為零，
/// 來源點陣圖不得為空
pub struct ThumbnailWorker {
    source_bitmap: Bitmap,
    timestamp: i64,
    source: String,
    target_size: Size,
    quality: ThumbnailQualitySettings,
    sender: Sender<ThumbnailEvent>,
    cancel: CancelFlag,
}

impl ThumbnailWorker {
    #[must_use]
    pub fn new(
        source_bitmap: Bitmap,
        timestamp: i64,
        source: impl Into<String>,
        target_size: Size,
        quality: ThumbnailQualitySettings,
        cancel: CancelFlag,
    ) -> (Self, Receiver<ThumbnailEvent>) {
        let (sender, receiver) = unbounded();
        (
            Self {
                source_bitmap,
                timestamp,
                source: source.into(),
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

    /// 執行縮圖產生；`Ok(None)` 表示已取消
    pub fn run(self) -> Result<Option<Bitmap>, ThumbnailError> {
        let Self {
            source_bitmap,
            timestamp,
            source,
            target_size,
            quality,
            sender,
            cancel,
        } = self;

        let result = generate(
            &source_bitmap,
            timestamp,
            &source,
            target_size,
            &quality,
            &sender,
            &cancel,
        );
        match &result {
            Ok(Some(_)) => {}
            Ok(None) => warn!("縮圖產生已取消: {source} @ {timestamp}"),
            Err(e) => {
                error!("縮圖產生失敗: {source} @ {timestamp}: {e}");
                let _ = sender.send(ThumbnailEvent::Error(*e));
            }
        }
        let _ = sender.send(ThumbnailEvent::Finished);

        result
    }
}

impl WorkerTask for ThumbnailWorker {
    fn run_task(self) {
        let _ = self.run();
    }
}

fn generate(
    source_bitmap: &Bitmap,
    timestamp: i64,
    source: &str,
    target_size: Size,
    quality: &ThumbnailQualitySettings,
    sender: &Sender<ThumbnailEvent>,
    cancel: &CancelFlag,
) -> Result<Option<Bitmap>, ThumbnailError> {
    check_preconditions(source_bitmap, target_size)?;

    let progress = |percent: u8, message: &str| {
        let _ = sender.send(ThumbnailEvent::Progress(ProgressEvent::new(
            percent, message,
        )));
    };

    progress(0, "開始產生縮圖");

    if cancel.is_cancelled() {
        return Ok(None);
    }
    let filter = ScaleFilter::from_settings(quality);
    let aspect = AspectMode::from_settings(quality);
    progress(25, "已解析縮圖品質設定");

    if cancel.is_cancelled() {
        return Ok(None);
    }
    let mut scaled = scale_to(source_bitmap.image(), target_size, aspect, filter);
    progress(50, "已縮放影像");

    if cancel.is_cancelled() {
        return Ok(None);
    }
    if aspect == AspectMode::Keep
        && let Some(background) = quality.background_color
    {
        scaled = add_background(&scaled, target_size, background);
    }
    progress(75, "已合成背景");

    if cancel.is_cancelled() {
        return Ok(None);
    }
    if quality.border_width > 0 {
        add_border(&mut scaled, quality.border_width, quality.border_color);
    }
    let thumbnail = Bitmap::new(scaled);
    progress(100, "縮圖產生完成");

    let _ = sender.send(ThumbnailEvent::ThumbnailReady(CapturedFrame {
        bitmap: thumbnail.clone(),
        timestamp,
        source: source.to_string(),
    }));

    Ok(Some(thumbnail))
}

fn check_preconditions(source: &Bitmap, target_size: Size) -> Result<(), ThumbnailError> {
    if target_size.is_empty() {
        return Err(ThumbnailError::InvalidTargetSize {
            width: target_size.width,
            height: target_size.height,
        });
    }
    if source.is_empty() {
        return Err(ThumbnailError::NullSourceImage);
    }
    Ok(())
}

/// 批次共用的單張演算法：沒有里程碑，也不在中途輪詢取消
pub(super) fn render_thumbnail(
    source: &Bitmap,
    target_size: Size,
    quality: &ThumbnailQualitySettings,
) -> Result<Bitmap, ThumbnailError> {
    check_preconditions(source, target_size)?;

    let filter = ScaleFilter::from_settings(quality);
    let aspect = AspectMode::from_settings(quality);

    let mut scaled = scale_to(source.image(), target_size, aspect, filter);
    if aspect == AspectMode::Keep
        && let Some(background) = quality.background_color
    {
        scaled = add_background(&scaled, target_size, background);
    }
    if quality.border_width > 0 {
        add_border(&mut scaled, quality.border_width, quality.border_color);
    }

    Ok(Bitmap::new(scaled))
}
