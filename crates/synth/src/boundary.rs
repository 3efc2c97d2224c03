use kassou_core::market::entity::Candle;
use kassou_core::target::entity::{BoundaryField, BoundaryPoints, BoundaryViolation};
use kassou_core::target::error::TargetError;

/// 左锚点低于首位收盘价时的字段级错误文案
pub const LEFT_POINT_MESSAGE: &str = "Left point should be bigger than first graph amount";
/// 右锚点低于末位收盘价时的字段级错误文案
pub const RIGHT_POINT_MESSAGE: &str = "Right point should be bigger than last graph amount";

/// # Summary
/// 锚点校验：合法当且仅当 `left_point >= 首位收盘价` 且 `right_point >= 末位收盘价`。
///
/// # Logic
/// 1. 序列为空时校验无法进行，返回 `EmptySeries`。
/// 2. 两项规则独立判定，违规各自生成一条字段级错误。
/// 3. 有任何违规时整体失败，且两条错误必须一并带回。
///
/// # Arguments
/// * `series`: 升序月度 K 线。
/// * `points`: 用户给定的左右锚点。
///
/// # Returns
/// 通过返回 Ok(())；否则返回 `Boundary`（字段级错误列表）或 `EmptySeries`。
pub fn validate_boundaries(series: &[Candle], points: BoundaryPoints) -> Result<(), TargetError> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(TargetError::EmptySeries),
    };

    let mut violations = Vec::new();
    if points.left_point < first.close {
        violations.push(BoundaryViolation {
            field: BoundaryField::LeftPoint,
            message: LEFT_POINT_MESSAGE.to_string(),
        });
    }
    if points.right_point < last.close {
        violations.push(BoundaryViolation {
            field: BoundaryField::RightPoint,
            message: RIGHT_POINT_MESSAGE.to_string(),
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(TargetError::Boundary(violations))
    }
}
