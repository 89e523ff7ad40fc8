//! 日誌初始化
//!
//! 由內嵌本子系統的應用程式在啟動時呼叫一次

use env_logger::Env;

pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
