use kassou_core::market::entity::Candle;
use kassou_core::target::entity::GraphPoint;
use kassou_core::target::error::TargetError;
use rust_decimal::Decimal;

/// # Summary
/// 将偏移量序列叠加到收盘价上，组装输出图表点。
///
/// # Logic
/// 1. 要求偏移量与 K 线序列严格等长，否则返回 `LengthMismatch`。
/// 2. 按原始顺序逐位相加：value[i] = close[i] + delta[i]，时间戳原样透传。
///
/// # Arguments
/// * `series`: 升序月度 K 线。
/// * `deltas`: 与 `series` 等长的偏移量序列。
///
/// # Returns
/// 成功返回与输入等长、同序的 `GraphPoint` 序列。
pub fn compose_output(
    series: &[Candle],
    deltas: &[Decimal],
) -> Result<Vec<GraphPoint>, TargetError> {
    if series.len() != deltas.len() {
        return Err(TargetError::LengthMismatch {
            series: series.len(),
            delta: deltas.len(),
        });
    }

    Ok(series
        .iter()
        .zip(deltas.iter())
        .map(|(candle, delta)| GraphPoint {
            time_line: candle.date_time,
            value: candle.close + delta,
        })
        .collect())
}
