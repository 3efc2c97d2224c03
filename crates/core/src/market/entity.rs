use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Summary
/// 单根月度 K 线实体，同时也是 `GET /api/Core/GetYahoo` 的线上格式。
/// 序列化采用 camelCase 字段名，与旧版服务端 JSON 输出保持逐字节兼容。
///
/// # Invariants
/// - 序列内按 `date_time` 升序排列，每个自然月一条。
/// - `high` 必须大于或等于 `low`、`open`、`close`。
/// - `output` 仅在客户端合并计算结果后才有值，服务端抓取输出恒为 null。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    // K 线所在月份的起始时刻
    pub date_time: DateTime<Utc>,
    // 开盘价
    pub open: Decimal,
    // 最高价
    pub high: Decimal,
    // 最低价
    pub low: Decimal,
    // 收盘价
    pub close: Decimal,
    // 成交量
    pub volume: Decimal,
    // 调整后收盘价 (处理分红、拆股等复权情况)
    pub adjusted_close: Decimal,
    // 按位次合并进来的目标值 (滑动路径结果)
    pub output: Option<Decimal>,
}
