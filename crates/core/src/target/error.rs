use thiserror::Error;

use crate::target::entity::BoundaryViolation;

/// # Summary
/// 目标合成域错误枚举。前两类是可向用户解释的业务结局，
/// 后两类是管线前置条件被破坏（上游数据畸形），必须大声失败。
#[derive(Error, Debug)]
pub enum TargetError {
    // 序列为空，校验无法进行
    #[error("No data available for boundary validation")]
    EmptySeries,
    // 锚点校验失败，携带全部字段级错误
    #[error("Boundary validation failed")]
    Boundary(Vec<BoundaryViolation>),
    // 序列长度不足 2，滑动步长分母为 N-1，不允许除零
    #[error("Series too short for glide path: got {0} candles, need at least 2")]
    TooShort(usize),
    // 偏移量与 K 线序列长度不一致
    #[error("Length mismatch: series has {series} candles but {delta} deltas")]
    LengthMismatch { series: usize, delta: usize },
}
