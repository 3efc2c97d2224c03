//! # `kassou-synth` - 结果合成管线
//!
//! 纯同步计算层：锚点校验 -> 滑动偏移量 -> 输出序列合成。
//! 本 crate 无任何 IO，服务端在抓取到 K 线序列之后调用 [`synthesize`]，
//! 客户端预检则只复用校验规则。所有失败走 `kassou-core` 的 `TargetError`。

pub mod boundary;
pub mod compose;
pub mod glide;

use kassou_core::market::entity::Candle;
use kassou_core::target::entity::{BoundaryPoints, GraphPoint};
use kassou_core::target::error::TargetError;

/// # Summary
/// 完整合成管线：校验 -> 偏移量 -> 合成。
///
/// # Logic
/// 1. 校验左右锚点不低于序列首/末收盘价（两项违规一并上报）。
/// 2. 计算逐位次滑动偏移量。
/// 3. 将偏移量按位次叠加到收盘价，产出输出序列。
///
/// # Arguments
/// * `series`: 升序月度 K 线，长度 N。
/// * `points`: 用户给定的左右锚点。
///
/// # Returns
/// 成功返回长度 N 的输出序列；任一阶段失败返回 `TargetError`。
pub fn synthesize(
    series: &[Candle],
    points: BoundaryPoints,
) -> Result<Vec<GraphPoint>, TargetError> {
    boundary::validate_boundaries(series, points)?;
    let deltas = glide::glide_deltas(series, points)?;
    compose::compose_output(series, &deltas)
}
