use crate::action::Action;
use crate::chart::build_chart;
use crate::state::ClientState;
use crate::transport::CoreApi;
use kassou_core::market::entity::Candle;
use kassou_core::target::entity::GraphPoint;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// 左锚点预检失败时给用户的提示文案
pub const LEFT_POINT_ALERT: &str =
    "Begin point must be bigger than the first value on the input table";
/// 右锚点预检失败时给用户的提示文案
pub const RIGHT_POINT_ALERT: &str =
    "End point must be bigger than the last value on the input table";

/// # Summary
/// 计算请求发出前的同步预检失败。
/// 预检与服务端校验采用同一条比较规则，文案面向用户弹窗。
#[derive(Error, Debug, PartialEq)]
pub enum PrecheckError {
    // 表格还没有数据，锚点无从比较
    #[error("No input data to validate against")]
    EmptyTable,
    // 锚点低于表格首/末值，alerts 为要展示的完整提示
    #[error("{}", .alerts.join(" "))]
    Anchors { alerts: Vec<String> },
}

/// # Summary
/// 纯归约器：给定当前状态与一个动作，产出下一个状态值。
///
/// # Logic
/// 1. `SetLeftPoint` / `SetRightPoint` 替换对应锚点并清掉在途标记。
/// 2. `RequestFetch` / `RequestCompute` 记录目标代码并挂起在途标记。
/// 3. `ReceiveFetch` / `ReceiveCompute` 仅当动作携带的代码与状态中的
///    代码一致时才被接受，过期响应原样返回旧状态（乱序防御）。
/// 4. `ReceiveCompute` 被接受时按位次把目标值合并进 K 线行，
///    并重建派生图表。
///
/// # Invariants
/// - 穷尽匹配所有动作种类，不设默认分支。
/// - 永不改写传入的 `state`，每次调用都构造新值。
///
/// # Arguments
/// * `state`: 当前状态（只读）。
/// * `action`: 待应用的动作。
///
/// # Returns
/// 迁移后的新状态值。
pub fn reduce(state: &ClientState, action: Action) -> ClientState {
    match action {
        Action::SetLeftPoint { value } => ClientState {
            left_point: value,
            is_loading: false,
            ..state.clone()
        },
        Action::SetRightPoint { value } => ClientState {
            right_point: value,
            is_loading: false,
            ..state.clone()
        },
        Action::RequestFetch { ticker } => ClientState {
            ticker,
            is_loading: true,
            ..state.clone()
        },
        Action::ReceiveFetch { ticker, series } => {
            if ticker == state.ticker {
                ClientState {
                    series,
                    is_loading: false,
                    ..state.clone()
                }
            } else {
                state.clone()
            }
        }
        // 动作携带的锚点不落入状态：锚点仅由 Set*Point 维护
        Action::RequestCompute {
            ticker,
            left_point: _,
            right_point: _,
        } => ClientState {
            ticker,
            is_loading: true,
            ..state.clone()
        },
        Action::ReceiveCompute { ticker, output } => {
            if ticker == state.ticker {
                let series = merge_output(&state.series, &output);
                let chart = Some(build_chart(&series, &output));
                ClientState {
                    series,
                    output,
                    chart,
                    is_loading: false,
                    ..state.clone()
                }
            } else {
                state.clone()
            }
        }
    }
}

/// 按位次把目标值写进 K 线行的 `output` 字段，产出新序列
fn merge_output(series: &[Candle], output: &[GraphPoint]) -> Vec<Candle> {
    series
        .iter()
        .enumerate()
        .map(|(i, candle)| {
            let mut candle = candle.clone();
            candle.output = output.get(i).map(|point| point.value);
            candle
        })
        .collect()
}

/// # Summary
/// 带副作用的状态容器门面，状态的唯一写者。
///
/// # Logic
/// - 所有迁移经由 [`dispatch`](Self::dispatch) 同步走纯归约器。
/// - 两类网络请求作为独立协程运行，完成结果以 `Receive*` 动作投入
///   内部无界队列，由持有者通过 [`process_next`](Self::process_next) /
///   [`try_process`](Self::try_process) 泵回归约器。
/// - 传输失败只记日志、不投递动作：在途标记保持挂起，
///   与旧版客户端"未处理的请求失败"行为保持一致。
///
/// # Invariants
/// - 状态只能整体替换，外部只拿得到只读借用。
/// - 过期响应的丢弃发生在归约时，依据是代码相等，没有序号、
///   没有取消、没有超时；同一代码的并发抓取不去重。
pub struct ClientStore {
    /// 当前状态值
    state: ClientState,
    /// 服务端访问端口
    api: Arc<dyn CoreApi>,
    /// 完成动作的投递端（克隆给网络协程）
    completions_tx: mpsc::UnboundedSender<Action>,
    /// 完成动作的消费端（仅持有者泵取）
    completions_rx: mpsc::UnboundedReceiver<Action>,
}

impl ClientStore {
    /// # Summary
    /// 以未加载状态创建容器。
    ///
    /// # Arguments
    /// * `api` - 服务端访问端口的具体实现。
    pub fn new(api: Arc<dyn CoreApi>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: ClientState::unloaded(),
            api,
            completions_tx,
            completions_rx,
        }
    }

    /// 当前状态的只读借用
    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// # Summary
    /// 同步应用一个动作：旧状态整体替换为归约结果。
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = ?action, "dispatch");
        self.state = reduce(&self.state, action);
    }

    /// 替换左锚点
    pub fn set_left_point(&mut self, value: Decimal) {
        self.dispatch(Action::SetLeftPoint { value });
    }

    /// 替换右锚点
    pub fn set_right_point(&mut self, value: Decimal) {
        self.dispatch(Action::SetRightPoint { value });
    }

    /// # Summary
    /// 发起 K 线抓取。
    ///
    /// # Logic
    /// 1. 与当前状态中的代码相同时不做任何事（原始去重守卫）。
    /// 2. 启动抓取协程：成功以 `ReceiveFetch` 回投，失败仅记日志。
    /// 3. 同步派发 `RequestFetch`，在途标记立即可见。
    ///
    /// # Arguments
    /// * `ticker`: 目标证券代码。
    pub fn request_fetch(&mut self, ticker: &str) {
        if ticker == self.state.ticker {
            return;
        }

        let tx = self.completions_tx.clone();
        let api = Arc::clone(&self.api);
        let ticker_owned = ticker.to_string();
        tokio::spawn(async move {
            match api.fetch_series(&ticker_owned).await {
                Ok(series) => {
                    if tx
                        .send(Action::ReceiveFetch {
                            ticker: ticker_owned,
                            series,
                        })
                        .is_err()
                    {
                        tracing::debug!("store dropped before fetch completion was delivered");
                    }
                }
                Err(e) => {
                    tracing::warn!(ticker = %ticker_owned, error = %e, "series fetch failed, nothing dispatched");
                }
            }
        });

        self.dispatch(Action::RequestFetch {
            ticker: ticker.to_string(),
        });
    }

    /// # Summary
    /// 发起目标序列计算。
    ///
    /// # Logic
    /// 1. 同步预检：表格为空或锚点低于首/末值时直接返回错误，
    ///    不派发任何动作（给用户的阻塞式弹窗在调用方）。
    /// 2. 预检通过后启动计算协程：成功以 `ReceiveCompute` 回投，
    ///    失败仅记日志。
    /// 3. 同步派发 `RequestCompute`。
    ///
    /// # Arguments
    /// * `ticker`: 目标证券代码。
    /// * `left_point` / `right_point`: 用户给定的左右锚点。
    ///
    /// # Returns
    /// 预检失败返回 `PrecheckError`，其余情况返回 `Ok(())`。
    pub fn request_compute(
        &mut self,
        ticker: &str,
        left_point: Decimal,
        right_point: Decimal,
    ) -> Result<(), PrecheckError> {
        let (first, last) = match (self.state.series.first(), self.state.series.last()) {
            (Some(first), Some(last)) => (first.close, last.close),
            _ => return Err(PrecheckError::EmptyTable),
        };

        let mut alerts = Vec::new();
        if left_point < first {
            alerts.push(LEFT_POINT_ALERT.to_string());
        }
        if right_point < last {
            alerts.push(RIGHT_POINT_ALERT.to_string());
        }
        if !alerts.is_empty() {
            return Err(PrecheckError::Anchors { alerts });
        }

        let tx = self.completions_tx.clone();
        let api = Arc::clone(&self.api);
        let ticker_owned = ticker.to_string();
        tokio::spawn(async move {
            match api
                .compute_target(&ticker_owned, left_point, right_point)
                .await
            {
                Ok(output) => {
                    if tx
                        .send(Action::ReceiveCompute {
                            ticker: ticker_owned,
                            output,
                        })
                        .is_err()
                    {
                        tracing::debug!("store dropped before compute completion was delivered");
                    }
                }
                Err(e) => {
                    tracing::warn!(ticker = %ticker_owned, error = %e, "compute request failed, nothing dispatched");
                }
            }
        });

        self.dispatch(Action::RequestCompute {
            ticker: ticker.to_string(),
            left_point,
            right_point,
        });
        Ok(())
    }

    /// # Summary
    /// 等待并应用下一个完成动作（协程回投的 `Receive*`）。
    pub async fn process_next(&mut self) {
        if let Some(action) = self.completions_rx.recv().await {
            self.dispatch(action);
        }
    }

    /// # Summary
    /// 非阻塞地尝试应用一个完成动作。
    ///
    /// # Returns
    /// 队列中有动作并已应用时返回 `true`，否则返回 `false`。
    pub fn try_process(&mut self) -> bool {
        match self.completions_rx.try_recv() {
            Ok(action) => {
                self.dispatch(action);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn candle(month: u32, close: Decimal) -> Candle {
        Candle {
            date_time: Utc
                .with_ymd_and_hms(2025, month, 1, 0, 0, 0)
                .single()
                .unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: dec!(10),
            adjusted_close: close,
            output: None,
        }
    }

    fn point(month: u32, value: Decimal) -> GraphPoint {
        GraphPoint {
            time_line: Utc
                .with_ymd_and_hms(2025, month, 1, 0, 0, 0)
                .single()
                .unwrap(),
            value,
        }
    }

    fn loaded_state(ticker: &str) -> ClientState {
        ClientState {
            ticker: ticker.to_string(),
            series: vec![candle(1, dec!(100)), candle(2, dec!(110))],
            ..ClientState::unloaded()
        }
    }

    #[test]
    fn test_set_points_replace_anchor_and_clear_loading() {
        let state = ClientState {
            is_loading: true,
            ..ClientState::unloaded()
        };

        let next = reduce(&state, Action::SetLeftPoint { value: dec!(95) });
        assert_eq!(next.left_point, dec!(95));
        assert!(!next.is_loading, "设置锚点必须顺带清掉在途标记");

        let next = reduce(&next, Action::SetRightPoint { value: dec!(140) });
        assert_eq!(next.right_point, dec!(140));
        assert_eq!(next.left_point, dec!(95));
        assert!(!next.is_loading);
    }

    #[test]
    fn test_request_fetch_sets_ticker_and_loading() {
        let state = ClientState::unloaded();

        let next = reduce(
            &state,
            Action::RequestFetch {
                ticker: "AAPL".to_string(),
            },
        );

        assert_eq!(next.ticker, "AAPL");
        assert!(next.is_loading);
        assert!(next.series.is_empty(), "请求阶段不得动旧数据");
    }

    #[test]
    fn test_receive_fetch_replaces_series_when_ticker_matches() {
        let state = ClientState {
            ticker: "AAPL".to_string(),
            is_loading: true,
            ..ClientState::unloaded()
        };
        let series = vec![candle(1, dec!(100)), candle(2, dec!(110))];

        let next = reduce(
            &state,
            Action::ReceiveFetch {
                ticker: "AAPL".to_string(),
                series: series.clone(),
            },
        );

        assert_eq!(next.series, series);
        assert!(!next.is_loading);
    }

    #[test]
    fn test_receive_fetch_discards_stale_ticker() {
        let state = ClientState {
            ticker: "MSFT".to_string(),
            is_loading: true,
            ..ClientState::unloaded()
        };

        let next = reduce(
            &state,
            Action::ReceiveFetch {
                ticker: "AAPL".to_string(),
                series: vec![candle(1, dec!(100))],
            },
        );

        assert_eq!(next.ticker, "MSFT");
        assert!(next.series.is_empty(), "过期响应不得写入任何数据");
        assert!(next.is_loading, "过期响应不得清掉在途标记");
    }

    #[test]
    fn test_request_compute_does_not_persist_action_anchors() {
        let state = ClientState {
            left_point: dec!(95),
            right_point: dec!(140),
            ..loaded_state("AAPL")
        };

        let next = reduce(
            &state,
            Action::RequestCompute {
                ticker: "AAPL".to_string(),
                left_point: dec!(1),
                right_point: dec!(2),
            },
        );

        // 状态中的锚点只认 Set*Point 写入的值
        assert_eq!(next.left_point, dec!(95));
        assert_eq!(next.right_point, dec!(140));
        assert!(next.is_loading);
    }

    #[test]
    fn test_receive_compute_merges_output_and_rebuilds_chart() {
        let state = loaded_state("AAPL");
        let output = vec![point(1, dec!(105)), point(2, dec!(120))];

        let next = reduce(
            &state,
            Action::ReceiveCompute {
                ticker: "AAPL".to_string(),
                output: output.clone(),
            },
        );

        assert_eq!(next.output, output);
        assert_eq!(next.series[0].output, Some(dec!(105)));
        assert_eq!(next.series[1].output, Some(dec!(120)));
        assert!(!next.is_loading);

        let chart = next.chart.as_ref().unwrap();
        assert_eq!(chart.labels, vec!["January", "February"]);
        assert_eq!(chart.datasets[0].data, vec![dec!(100), dec!(110)]);
        assert_eq!(chart.datasets[1].data, vec![dec!(105), dec!(120)]);
    }

    #[test]
    fn test_receive_compute_discards_stale_ticker() {
        let state = loaded_state("MSFT");

        let next = reduce(
            &state,
            Action::ReceiveCompute {
                ticker: "AAPL".to_string(),
                output: vec![point(1, dec!(105))],
            },
        );

        assert!(next.output.is_empty());
        assert!(next.chart.is_none());
        assert_eq!(next.series[0].output, None);
    }

    #[test]
    fn test_reduce_never_mutates_the_input_state() {
        let state = loaded_state("AAPL");
        let snapshot = state.clone();

        let _next = reduce(
            &state,
            Action::ReceiveCompute {
                ticker: "AAPL".to_string(),
                output: vec![point(1, dec!(105)), point(2, dec!(120))],
            },
        );

        assert_eq!(state, snapshot, "归约器必须产出新值而不是改写旧值");
    }
}
