use crate::market::entity::Candle;
use crate::market::error::MarketError;
use async_trait::async_trait;

/// # Summary
/// 时间序列提供者端口（原始行情数据源）。
///
/// # Invariants
/// - 返回的序列按月份升序排列，每个自然月至多一条。
/// - 实现者不得吞掉失败：网络或解析问题必须以 `MarketError` 形式上抛，
///   `Ok(vec![])` 仅表示"该代码在窗口内确实没有数据"。
/// - 无重试、无缓存，每次调用都是一次独立抓取。
#[async_trait]
pub trait TimeSeriesProvider: Send + Sync {
    /// # Summary
    /// 抓取指定代码的月度 K 线，窗口为截至"昨天"的过去 366 天。
    ///
    /// # Logic
    /// 1. 依据时钟端口确定窗口边界。
    /// 2. 向数据源发起一次抓取并解析。
    ///
    /// # Arguments
    /// * `ticker`: 证券代码，例如 "AAPL" 或 "^GSPC"。
    ///
    /// # Returns
    /// 成功返回升序 K 线列表（观测上为 12 根），失败返回 `MarketError`。
    async fn fetch_trailing_year(&self, ticker: &str) -> Result<Vec<Candle>, MarketError>;
}
