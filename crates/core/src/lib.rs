//! # `kassou-core` - 领域核心
//!
//! kassou（滑走）系统的领域层：实体、端口 (Port) 与领域错误的唯一定义处。
//! 本 crate 不包含任何 IO 实现，具体的行情抓取、HTTP 网关等适配器
//! 分别位于 `kassou-feed` 与 `kassou-api`，通过这里定义的 Trait 注入。
//!
//! ## 领域划分
//! - `market`  - 行情域：月度 K 线实体与时间序列提供者端口
//! - `target`  - 目标合成域：锚点、滑动路径输出点与校验错误
//! - `common`  - 跨域共享件（时钟端口）
//! - `config`  - 全局应用配置

pub mod common;
pub mod config;
pub mod market;
pub mod target;
