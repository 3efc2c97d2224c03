//! 行情域：月度 K 线实体、领域错误与时间序列提供者端口。

pub mod entity;
pub mod error;
pub mod port;
