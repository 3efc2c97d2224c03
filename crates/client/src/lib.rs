//! # `kassou-client` - 客户端状态机
//!
//! 面向渲染层的单写者状态容器。状态迁移由六种动作驱动，归约器是
//! 纯函数：每次迁移产出全新的状态值，旧值永不被原地修改。
//! 两类网络请求作为独立协程运行，其完成结果经由内部队列
//! 重新进入归约器，乱序到达的过期响应按"代码相等"规则在归约时丢弃。
//!
//! ## 模块划分
//! - `action`    - 动作联合体（带判别标签的枚举）
//! - `store`     - 纯归约器与带副作用的 `ClientStore` 门面
//! - `state`     - 状态形状与派生的表格行
//! - `chart`     - 派生的图表数据形状
//! - `fmt`       - 美元货币格式化
//! - `transport` - 服务端两个接口的访问端口与 reqwest 实现

pub mod action;
pub mod chart;
pub mod fmt;
pub mod state;
pub mod store;
pub mod transport;
