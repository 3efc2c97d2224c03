use kassou_core::market::entity::Candle;
use kassou_core::target::entity::GraphPoint;
use rust_decimal::Decimal;
use serde::Serialize;

/// # Summary
/// 派生的图表数据形状，序列化后可直接喂给前端折线图组件。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// X 轴标签：每根 K 线所在月份的英文月名
    pub labels: Vec<String>,
    /// 两条数据集：原始收盘价与合成目标值
    pub datasets: Vec<ChartDataset>,
}

/// # Summary
/// 单条折线数据集，颜色字段沿用 CSS rgb/rgba 字面量。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<Decimal>,
    pub border_color: String,
    pub background_color: String,
}

/// # Summary
/// 由 K 线序列与合成序列构建图表数据。
///
/// # Logic
/// 1. 标签取各 K 线月份的英文全名（January..December）。
/// 2. "Stock price" 数据集取收盘价，红色系配色。
/// 3. "Output" 数据集取合成目标值，蓝色系配色。
///
/// # Arguments
/// * `series`: 原始月度 K 线。
/// * `output`: 合成的目标序列。
///
/// # Returns
/// 可直接渲染的 `ChartData`。
pub fn build_chart(series: &[Candle], output: &[GraphPoint]) -> ChartData {
    let labels = series
        .iter()
        .map(|candle| candle.date_time.format("%B").to_string())
        .collect();

    ChartData {
        labels,
        datasets: vec![
            ChartDataset {
                label: "Stock price".to_string(),
                data: series.iter().map(|candle| candle.close).collect(),
                border_color: "rgb(255, 99, 132)".to_string(),
                background_color: "rgba(255, 99, 132, 0.5)".to_string(),
            },
            ChartDataset {
                label: "Output".to_string(),
                data: output.iter().map(|point| point.value).collect(),
                border_color: "rgb(53, 162, 235)".to_string(),
                background_color: "rgba(53, 162, 235, 0.5)".to_string(),
            },
        ],
    }
}
