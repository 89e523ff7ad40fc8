use crate::config::CaptureConfig;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// 間隔下限（秒）；設定值低於此會被提升
pub const MIN_INTERVAL_SECONDS: f64 = 0.1;

/// 間隔預設值（秒）
pub const DEFAULT_INTERVAL_SECONDS: f64 = 5.0;

/// 自動擷取控制器的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoCaptureEvent {
    /// 帶著觸發當下的播放時間戳
    CaptureRequested { timestamp: i64 },
    IntervalReached,
    StatusChanged(String),
}

#[derive(Debug)]
struct State {
    active: bool,
    interval: Duration,
    last_capture: Instant,
}

/// 自動擷取控制器
///
/// `check_capture_time` 由播放時鐘高頻呼叫，`set_active` 與
/// `set_interval` 來自 UI 執行緒；所有狀態都在單一互斥鎖下。
/// 間隔比較用的是牆鐘經過時間，不是影片時間戳。
/// `Condvar` 在啟停時喚醒等待者，本子系統內沒有元件阻塞於此，
/// 保留給未來的輪詢執行緒
#[derive(Debug)]
pub struct AutoCaptureController {
    state: Mutex<State>,
    activity: Condvar,
    sender: Sender<AutoCaptureEvent>,
}

impl AutoCaptureController {
    #[must_use]
    pub fn new(interval_seconds: f64) -> (Self, Receiver<AutoCaptureEvent>) {
        let (sender, receiver) = unbounded();
        let controller = Self {
            state: Mutex::new(State {
                active: false,
                interval: Duration::from_secs_f64(interval_seconds.max(MIN_INTERVAL_SECONDS)),
                last_capture: Instant::now(),
            }),
            activity: Condvar::new(),
            sender,
        };
        (controller, receiver)
    }

    #[must_use]
    pub fn from_config(config: &CaptureConfig) -> (Self, Receiver<AutoCaptureEvent>) {
        Self::new(config.auto_capture_interval_seconds)
    }

    /// 啟動或停止自動擷取
    ///
    /// 啟動時以當下牆鐘時間作為新的間隔基準；
    /// 重複設定相同狀態不會再次發出通知
    pub fn set_active(&self, active: bool) {
        let mut state = self.lock();
        if state.active == active {
            return;
        }

        state.active = active;
        if active {
            state.last_capture = Instant::now();
            info!("自動擷取已啟動");
            let _ = self
                .sender
                .send(AutoCaptureEvent::StatusChanged("自動擷取已啟動".to_string()));
        } else {
            info!("自動擷取已停止");
            let _ = self
                .sender
                .send(AutoCaptureEvent::StatusChanged("自動擷取已停止".to_string()));
        }

        self.activity.notify_all();
    }

    /// 設定間隔（秒），下限 0.1；立即生效，不重設基準時間
    pub fn set_interval(&self, seconds: f64) {
        let clamped = seconds.max(MIN_INTERVAL_SECONDS);
        let mut state = self.lock();
        state.interval = Duration::from_secs_f64(clamped);
        debug!("自動擷取間隔更新為 {clamped:.1} 秒");
    }

    /// 由播放時鐘餵入目前的影片時間戳
    ///
    /// 未啟動時不做任何事；牆鐘經過時間達到間隔時，
    /// 原子性地更新基準並發出擷取請求
    pub fn check_capture_time(&self, current_timestamp: i64) {
        let mut state = self.lock();
        if !state.active {
            return;
        }

        if state.last_capture.elapsed() >= state.interval {
            state.last_capture = Instant::now();
            debug!("到達擷取間隔，請求擷取 @ {current_timestamp}");
            let _ = self.sender.send(AutoCaptureEvent::CaptureRequested {
                timestamp: current_timestamp,
            });
            let _ = self.sender.send(AutoCaptureEvent::IntervalReached);
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lock().active
    }

    #[must_use]
    pub fn interval_seconds(&self) -> f64 {
        self.lock().interval.as_secs_f64()
    }

    /// 等待啟用狀態變為 `target`；逾時仍未達成時回傳 false
    ///
    /// 供外部計時執行緒使用的擴充點
    pub fn wait_for_active(&self, target: bool, timeout: Duration) -> bool {
        let state = self.lock();
        let (state, _) = self
            .activity
            .wait_timeout_while(state, timeout, |s| s.active != target)
            .unwrap_or_else(PoisonError::into_inner);
        state.active == target
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
