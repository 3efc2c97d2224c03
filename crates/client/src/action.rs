use kassou_core::market::entity::Candle;
use kassou_core::target::entity::GraphPoint;
use rust_decimal::Decimal;

/// # Summary
/// 状态迁移动作联合体，六种动作一一对应六类迁移。
/// 归约器对本枚举做穷尽匹配，不设默认分支：新增动作种类时
/// 编译器会强制补齐对应的归约规则。
///
/// # Invariants
/// - 动作只描述"将要发生什么"，本身不携带副作用。
/// - `Receive*` 动作只能由对应 `Request*` 动作派生的网络任务投递。
#[derive(Debug, Clone)]
pub enum Action {
    /// 替换左锚点
    SetLeftPoint { value: Decimal },
    /// 替换右锚点
    SetRightPoint { value: Decimal },
    /// 发起指定代码的 K 线抓取
    RequestFetch { ticker: String },
    /// K 线抓取完成回投
    ReceiveFetch { ticker: String, series: Vec<Candle> },
    /// 发起目标序列计算
    RequestCompute {
        ticker: String,
        left_point: Decimal,
        right_point: Decimal,
    },
    /// 目标序列计算完成回投
    ReceiveCompute {
        ticker: String,
        output: Vec<GraphPoint>,
    },
}
