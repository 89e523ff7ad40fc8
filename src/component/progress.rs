/// 單項作業的進度事件
///
/// 於固定里程碑 (0/25/50/75/100) 發出；批次作業改用
/// `(index, total, message)` 形式的進度事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub percent: u8,
    pub message: String,
}

impl ProgressEvent {
    #[must_use]
    pub fn new(percent: u8, message: impl Into<String>) -> Self {
        Self {
            percent,
            message: message.into(),
        }
    }
}
