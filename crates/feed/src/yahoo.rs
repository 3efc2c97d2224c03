use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use kassou_core::common::time::TimeProvider;
use kassou_core::config::FeedConfig;
use kassou_core::market::entity::Candle;
use kassou_core::market::error::MarketError;
use kassou_core::market::port::TimeSeriesProvider;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use std::sync::Arc;

/// # Summary
/// Yahoo Finance 行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯。
/// - "今天"一律从注入的时钟端口取得，抓取窗口因此可以在测试中钉死。
#[derive(Clone)]
pub struct YahooProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 时钟端口，决定窗口中"今天"的含义
    clock: Arc<dyn TimeProvider>,
}

impl YahooProvider {
    /// # Summary
    /// 创建一个新的 YahooProvider 实例。
    ///
    /// # Logic
    /// 1. 按配置设置请求超时（默认 10 秒）。
    /// 2. 设置伪装浏览器 Header (User-Agent) 以减少被拦截风险。
    /// 3. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `clock`: 时钟端口。
    /// * `config`: 行情抓取配置。
    ///
    /// # Returns
    /// 成功返回初始化后的 YahooProvider，客户端构建失败返回 `MarketError`。
    pub fn new(clock: Arc<dyn TimeProvider>, config: &FeedConfig) -> Result<Self, MarketError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
            ),
        );

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| MarketError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, clock })
    }
}

/// # Summary
/// Yahoo API 响应顶层结构。
///
/// # Invariants
/// - 映射自 Yahoo v8 chart 接口。
#[derive(Deserialize, Debug)]
struct YahooResponse {
    chart: YahooChart,
}

/// # Summary
/// Yahoo API 图表数据部分。
#[derive(Deserialize, Debug)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

/// # Summary
/// Yahoo API 错误详情。
#[derive(Deserialize, Debug)]
struct YahooError {
    code: String,
    description: String,
}

/// # Summary
/// Yahoo API 单个时间序列结果。
#[derive(Deserialize, Debug)]
struct YahooResult {
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

/// # Summary
/// Yahoo API 指标容器。
#[derive(Deserialize, Debug)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
    // 调整后的价格数据
    adjclose: Option<Vec<YahooAdjClose>>,
}

/// # Summary
/// Yahoo API 调整后价格结构。
#[derive(Deserialize, Debug)]
struct YahooAdjClose {
    // 调整后的收盘价列表
    adjclose: Vec<Option<f64>>,
}

/// # Summary
/// Yahoo API 原始报价数据。
#[derive(Deserialize, Debug)]
struct YahooQuote {
    /// 开盘价列表
    open: Vec<Option<f64>>,
    /// 最高价列表
    high: Vec<Option<f64>>,
    /// 最低价列表
    low: Vec<Option<f64>>,
    /// 收盘价列表
    close: Vec<Option<f64>>,
    /// 成交量列表
    volume: Vec<Option<f64>>,
}

/// # Summary
/// 以"今天"为基准计算抓取窗口。
///
/// # Logic
/// 1. 窗口终点取昨天，避免把当天未走完的月 K 线算进来。
/// 2. 窗口起点取 366 天前，保证跨闰年也能覆盖整整一年。
///
/// # Arguments
/// * `today`: 时钟端口给出的当前时间。
///
/// # Returns
/// 返回 `(start, end)` 窗口边界。
fn trailing_window(today: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = today - Duration::days(1);
    let start = today - Duration::days(366);
    (start, end)
}

/// # Summary
/// 将 Yahoo 响应体折叠为 K 线列表。
///
/// # Logic
/// 1. 响应内嵌错误对象优先处理：code 为 "Not Found" 视为查无代码，
///    其余上抛为 `Unknown`。
/// 2. result 缺失或为空视为查无数据。
/// 3. 任一 OHLCV 字段为 null 的位次视为数据空洞，整行跳过。
/// 4. f64 价格转 `Decimal`，缺失的 adjclose 回退为当日收盘价。
///
/// # Arguments
/// * `json`: 已反序列化的 Yahoo 响应。
///
/// # Returns
/// 成功返回升序 K 线列表，失败返回 `MarketError`。
fn candles_from_response(json: YahooResponse) -> Result<Vec<Candle>, MarketError> {
    if let Some(err) = json.chart.error {
        if err.code == "Not Found" {
            return Err(MarketError::NotFound);
        }
        return Err(MarketError::Unknown(err.description));
    }

    let result = json
        .chart
        .result
        .ok_or(MarketError::NotFound)?
        .pop()
        .ok_or(MarketError::NotFound)?;

    let quote = result
        .indicators
        .quote
        .first()
        .ok_or(MarketError::Parse("No quote data".into()))?;

    let adj_close_list = result
        .indicators
        .adjclose
        .as_ref()
        .and_then(|v| v.first())
        .map(|v| &v.adjclose);

    let mut candles = Vec::new();
    for (i, &ts) in result.timestamp.iter().enumerate() {
        if let (Some(o), Some(h), Some(l), Some(c), Some(v)) = (
            quote.open.get(i).and_then(|x| *x),
            quote.high.get(i).and_then(|x| *x),
            quote.low.get(i).and_then(|x| *x),
            quote.close.get(i).and_then(|x| *x),
            quote.volume.get(i).and_then(|x| *x),
        ) {
            let Some(date_time) = Utc.timestamp_opt(ts, 0).single() else {
                continue;
            };
            let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
                Decimal::from_f64(o),
                Decimal::from_f64(h),
                Decimal::from_f64(l),
                Decimal::from_f64(c),
                Decimal::from_f64(v),
            ) else {
                continue;
            };
            let adjusted_close = adj_close_list
                .and_then(|list| list.get(i))
                .and_then(|x| *x)
                .and_then(Decimal::from_f64)
                .unwrap_or(close);

            candles.push(Candle {
                date_time,
                open,
                high,
                low,
                close,
                volume,
                adjusted_close,
                output: None,
            });
        }
    }

    Ok(candles)
}

#[async_trait]
impl TimeSeriesProvider for YahooProvider {
    /// # Summary
    /// 从 Yahoo Finance 抓取截至昨日的过去一年月度 K 线。
    ///
    /// # Logic
    /// 1. 依据时钟端口计算 period1 / period2 窗口边界。
    /// 2. 以 interval=1mo 构建 v8 chart API URL 并发起异步请求。
    /// 3. HTTP 404 直接视为代码不存在；其余非 2xx 视为网络失败。
    /// 4. 解析嵌套 JSON，提取 adjclose 并与基础 OHLCV 合并。
    ///
    /// # Arguments
    /// * `ticker`: 证券代码。
    ///
    /// # Returns
    /// 成功返回升序 K 线列表，失败返回 MarketError。
    async fn fetch_trailing_year(&self, ticker: &str) -> Result<Vec<Candle>, MarketError> {
        let (start, end) = trailing_window(self.clock.now());

        let url = format!("https://query1.finance.yahoo.com/v8/finance/chart/{ticker}");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("symbol", ticker),
                ("period1", &start.timestamp().to_string()),
                ("period2", &end.timestamp().to_string()),
                ("interval", "1mo"),
            ])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            // Yahoo 对不存在的代码返回 404，其余状态码一律按网络失败处理
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(MarketError::NotFound);
            }
            return Err(MarketError::Network(format!("HTTP {status}")));
        }

        let json: YahooResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        let candles = candles_from_response(json)?;
        tracing::debug!(ticker, count = candles.len(), "fetched monthly candles");
        Ok(candles)
    }
}
