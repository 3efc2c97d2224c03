//! 跨领域共享组件。

pub mod time;
