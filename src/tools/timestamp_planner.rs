/// 計算批次擷取用的均勻時間點（毫秒）
///
/// 在時長兩端各留 2% 的邊界避開片頭片尾，將剩餘區間
/// 等分為 `count` 段並取每段中點；回傳值嚴格遞增。
/// `count` 為 0 或時長非正時回傳空列表
#[must_use]
pub fn plan_uniform_timestamps(duration_ms: i64, count: usize) -> Vec<i64> {
    if count == 0 || duration_ms <= 0 {
        return Vec::new();
    }

    let duration = duration_ms as f64;
    let margin = duration * 0.02;
    let segment = (duration - margin * 2.0) / count as f64;
    let upper = (duration_ms - 1).max(1);

    let mut timestamps = Vec::with_capacity(count);
    for index in 0..count {
        let point = margin + segment * (index as f64 + 0.5);
        let mut timestamp = (point.round() as i64).clamp(1, upper);

        // 極短片源四捨五入可能重疊，強制遞增
        if let Some(&last) = timestamps.last()
            && timestamp <= last
        {
            timestamp = last + 1;
        }
        timestamps.push(timestamp);
    }

    timestamps
}
