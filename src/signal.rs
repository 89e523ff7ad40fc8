use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 合作式取消旗標
///
/// 由提交端與執行中的工作共享；設定後不會再清除，
/// 工作只在固定檢查點輪詢（批次工作則在項目之間）
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 將 Ctrl-C 接上一個取消旗標，供無介面的批次內嵌使用
#[must_use]
pub fn setup_shutdown_signal() -> CancelFlag {
    let flag = CancelFlag::new();
    let handler_flag = flag.clone();

    ctrlc::set_handler(move || {
        handler_flag.cancel();
        eprintln!("\n收到中斷信號，正在停止處理...");
    })
    .expect("無法設定 Ctrl-C 處理器");

    flag
}
