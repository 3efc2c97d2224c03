use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Summary
/// 输出序列中的单个图表点，同时也是 `POST /api/Core/PostYahoo` 的线上格式。
/// 与 K 线序列按位次一一对应：同序、同长，时间戳原样透传自对应 K 线。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphPoint {
    // 对应 K 线所在月份的起始时刻
    pub time_line: DateTime<Utc>,
    // 目标值 = 该位次收盘价 + 滑动偏移量
    pub value: Decimal,
}

/// # Summary
/// 用户给定的左右锚点。输出序列首位次必须命中左锚点，末位次命中右锚点。
/// 锚点与价格单位之间没有内在约束，仅受校验规则
/// （不低于序列首/末收盘价）限制。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPoints {
    pub left_point: Decimal,
    pub right_point: Decimal,
}

/// 校验失败所指向的锚点字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryField {
    LeftPoint,
    RightPoint,
}

impl BoundaryField {
    /// 线上格式 (camelCase) 的字段名，HTTP 边界用它拼装字段级错误体
    pub fn wire_name(self) -> &'static str {
        match self {
            BoundaryField::LeftPoint => "leftPoint",
            BoundaryField::RightPoint => "rightPoint",
        }
    }
}

/// 一条字段级锚点校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryViolation {
    /// 违规字段
    pub field: BoundaryField,
    /// 面向用户的错误文案
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_request_body_fields() {
        assert_eq!(BoundaryField::LeftPoint.wire_name(), "leftPoint");
        assert_eq!(BoundaryField::RightPoint.wire_name(), "rightPoint");
    }
}
