use crate::chart::ChartData;
use crate::fmt::usd;
use kassou_core::market::entity::Candle;
use kassou_core::target::entity::GraphPoint;
use rust_decimal::Decimal;

/// # Summary
/// 客户端全量状态。状态值只能通过归约器整体替换，
/// 渲染层经由只读借用消费，不得直接改写字段。
///
/// # Invariants
/// - `series` 与 `output` 按位次一一配对（不按日期匹配）。
/// - `chart` 是 `series` + `output` 的纯派生值，仅在计算结果
///   被接受时重建，其余迁移原样保留旧值。
/// - 会话期内唯一，无终止状态。
#[derive(Debug, Clone, PartialEq)]
pub struct ClientState {
    /// 当前展示的证券代码
    pub ticker: String,
    /// 是否有请求在途
    pub is_loading: bool,
    /// 原始月度 K 线序列
    pub series: Vec<Candle>,
    /// 合成的目标序列
    pub output: Vec<GraphPoint>,
    /// 派生的图表数据
    pub chart: Option<ChartData>,
    /// 左锚点
    pub left_point: Decimal,
    /// 右锚点
    pub right_point: Decimal,
}

impl ClientState {
    /// # Summary
    /// 会话起点的未加载状态：空代码、空序列、锚点归零、无在途请求。
    pub fn unloaded() -> Self {
        Self {
            ticker: String::new(),
            is_loading: false,
            series: Vec::new(),
            output: Vec::new(),
            chart: None,
            left_point: Decimal::ZERO,
            right_point: Decimal::ZERO,
        }
    }

    /// # Summary
    /// 派生输入表格的行数据。
    ///
    /// # Logic
    /// 1. 月份列取 `YYYY-MM`。
    /// 2. 收盘价与合并后的目标值都按美元货币格式化。
    /// 3. 尚未合并计算结果的行，目标列为 `None`。
    pub fn table_rows(&self) -> Vec<TableRow> {
        self.series
            .iter()
            .map(|candle| TableRow {
                month: candle.date_time.format("%Y-%m").to_string(),
                close: usd(candle.close),
                output: candle.output.map(usd),
            })
            .collect()
    }
}

/// # Summary
/// 输入表格的单行展示形状。
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// 月份列，`YYYY-MM`
    pub month: String,
    /// 收盘价列，美元格式
    pub close: String,
    /// 目标值列，计算结果合并后才有值
    pub output: Option<String>,
}
