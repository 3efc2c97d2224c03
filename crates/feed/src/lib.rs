//! # `kassou-feed` - 行情数据源适配层
//!
//! `kassou-core` 中 `TimeSeriesProvider` 端口的 Yahoo Finance 实现。
//! 使用 `reqwest` 访问 v8 chart 接口，按"截至昨日的过去 366 天、月度粒度"
//! 抓取 K 线，解析失败与未知代码一律以 `MarketError` 显式上抛，
//! 由上层决定如何呈现，本层不做吞错降级。

pub mod yahoo;
