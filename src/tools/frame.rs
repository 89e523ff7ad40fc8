use image::DynamicImage;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 影格映射模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    ReadOnly,
}

/// 外部影片管線持有的解碼影格握把
///
/// 像素資料只在成功 `map` 與對應 `unmap` 之間保證有效；
/// 工作元件在一次 `run` 期間借用影格，不跨呼叫持有
pub trait RawFrame: Send {
    /// 鎖定影格記憶體以供讀取；失敗回傳 false
    fn map(&mut self, mode: MapMode) -> bool;

    /// 釋放影格記憶體；對未映射的影格呼叫必須無害
    fn unmap(&mut self);

    /// 將映射中的影格解碼為影像；未映射或資料無效時為 None
    fn to_image(&self) -> Option<DynamicImage>;
}

/// RAII 守衛：無論成功、失敗或取消，離開作用域時都恰好
/// `unmap` 一次（包含 `map` 失敗與映射前即取消的路徑）
pub struct FrameGuard<F: RawFrame> {
    frame: F,
}

impl<F: RawFrame> FrameGuard<F> {
    pub fn new(frame: F) -> Self {
        Self { frame }
    }

    pub fn map(&mut self, mode: MapMode) -> bool {
        self.frame.map(mode)
    }

    pub fn to_image(&self) -> Option<DynamicImage> {
        self.frame.to_image()
    }
}

impl<F: RawFrame> Drop for FrameGuard<F> {
    fn drop(&mut self) {
        self.frame.unmap();
    }
}

/// 觀測 `map`/`unmap` 呼叫次數的探針
///
/// 計數器以 `Arc` 共享，影格交給工作元件之後仍可觀測
#[derive(Debug, Clone, Default)]
pub struct FrameProbe {
    maps: Arc<AtomicUsize>,
    unmaps: Arc<AtomicUsize>,
}

impl FrameProbe {
    #[must_use]
    pub fn map_calls(&self) -> usize {
        self.maps.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn unmap_calls(&self) -> usize {
        self.unmaps.load(Ordering::SeqCst)
    }
}

/// 記憶體內的 `RawFrame` 實作，供測試與內嵌示範使用
#[derive(Debug, Clone)]
pub struct MemoryFrame {
    image: Option<DynamicImage>,
    map_succeeds: bool,
    mapped: bool,
    probe: FrameProbe,
}

impl MemoryFrame {
    #[must_use]
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image: Some(image),
            map_succeeds: true,
            mapped: false,
            probe: FrameProbe::default(),
        }
    }

    /// `map` 必定失敗的影格，模擬無法鎖定的外部記憶體
    #[must_use]
    pub fn unmappable() -> Self {
        Self {
            image: None,
            map_succeeds: false,
            mapped: false,
            probe: FrameProbe::default(),
        }
    }

    /// `map` 成功但解不出影像的影格
    #[must_use]
    pub fn empty() -> Self {
        Self {
            image: None,
            map_succeeds: true,
            mapped: false,
            probe: FrameProbe::default(),
        }
    }

    #[must_use]
    pub fn probe(&self) -> FrameProbe {
        self.probe.clone()
    }
}

impl RawFrame for MemoryFrame {
    fn map(&mut self, _mode: MapMode) -> bool {
        self.probe.maps.fetch_add(1, Ordering::SeqCst);
        if self.map_succeeds {
            self.mapped = true;
        }
        self.map_succeeds
    }

    fn unmap(&mut self) {
        self.probe.unmaps.fetch_add(1, Ordering::SeqCst);
        self.mapped = false;
    }

    fn to_image(&self) -> Option<DynamicImage> {
        if !self.mapped {
            return None;
        }
        self.image.clone()
    }
}
