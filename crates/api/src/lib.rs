//! # `kassou-api` - HTTP API 网关
//!
//! 本 crate 是 kassou 目标序列合成服务的 HTTP/REST 入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自浏览器客户端的 HTTP 请求
//! - 调用下层 `TimeSeriesProvider` 抓取月度 K 线
//! - 调用 `kassou-synth` 的合成管线产出目标序列
//! - 将领域错误统一映射为 HTTP 状态码与 JSON 错误体

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
