//! 目标合成域：锚点、输出图表点与目标合成错误。

pub mod entity;
pub mod error;
