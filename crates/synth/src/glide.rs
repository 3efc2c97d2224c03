use kassou_core::market::entity::Candle;
use kassou_core::target::entity::BoundaryPoints;
use kassou_core::target::error::TargetError;
use rust_decimal::Decimal;

/// # Summary
/// 计算逐位次滑动偏移量（glide path）。
///
/// # Logic
/// 1. N < 2 直接拒绝：步长分母为 N-1，必须显式失败而不是除零。
/// 2. 首位偏移 = 左锚点 - 首位收盘价；末位偏移 = 右锚点 - 末位收盘价。
/// 3. 中间位次 = (右锚点 - 首位收盘价) + 步长 * i，
///    其中 步长 = ((右锚点 - 首位收盘价) - (左锚点 - 末位收盘价)) / (N - 1)。
///
/// 注意：中间位次刻意不以首位偏移为起点，整段内部序列与 delta[0] 不连续。
/// 这是既有输出口径的一部分，下游按此对账；改成平滑线性插值属于行为变更，
/// 需要先评估兼容性，不要顺手"修掉"。
///
/// # Arguments
/// * `series`: 升序月度 K 线，长度 N。
/// * `points`: 用户给定的左右锚点。
///
/// # Returns
/// 成功返回长度 N 的偏移量序列；N < 2 返回 `TooShort`。
pub fn glide_deltas(
    series: &[Candle],
    points: BoundaryPoints,
) -> Result<Vec<Decimal>, TargetError> {
    let n = series.len();
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) if n >= 2 => (first, last),
        _ => return Err(TargetError::TooShort(n)),
    };

    let first_variation = points.left_point - first.close;
    let last_variation = points.right_point - last.close;
    let interior_base = points.right_point - first.close;
    let increment = (interior_base - (points.left_point - last.close)) / Decimal::from(n - 1);

    let mut deltas = Vec::with_capacity(n);
    deltas.push(first_variation);
    for i in 1..n - 1 {
        deltas.push(interior_base + increment * Decimal::from(i));
    }
    deltas.push(last_variation);

    Ok(deltas)
}
