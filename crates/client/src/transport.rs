use async_trait::async_trait;
use kassou_core::market::entity::Candle;
use kassou_core::target::entity::GraphPoint;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// # Summary
/// 客户端传输层错误。区分"请求没到对端"、"对端拒绝"与"响应体不可解码"。
#[derive(Error, Debug)]
pub enum ClientError {
    // 连接、超时等传输层失败
    #[error("Transport error: {0}")]
    Transport(String),
    // 对端返回的非 2xx 状态
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },
    // 响应体无法按约定形状解码
    #[error("Decode error: {0}")]
    Decode(String),
}

/// # Summary
/// 服务端两个接口的访问端口。状态容器只依赖本 Trait，
/// 测试中以内存 Mock 替换，真实实现见 [`HttpCoreApi`]。
#[async_trait]
pub trait CoreApi: Send + Sync {
    /// 拉取指定代码截至昨日的过去一年月度 K 线
    async fn fetch_series(&self, ticker: &str) -> Result<Vec<Candle>, ClientError>;

    /// 请求服务端按给定锚点合成目标序列
    async fn compute_target(
        &self,
        ticker: &str,
        left_point: Decimal,
        right_point: Decimal,
    ) -> Result<Vec<GraphPoint>, ClientError>;
}

/// `POST /api/Core/PostYahoo` 的请求体（camelCase 线上格式）
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRequest<'a> {
    ticker: &'a str,
    left_point: Decimal,
    right_point: Decimal,
}

/// # Summary
/// 基于 reqwest 的 [`CoreApi`] 实现，访问 kassou 服务端的两个接口。
#[derive(Clone)]
pub struct HttpCoreApi {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 服务端基地址，如 `http://127.0.0.1:8080`
    base_url: String,
}

impl HttpCoreApi {
    /// # Summary
    /// 创建指向给定基地址的实例。
    ///
    /// # Arguments
    /// * `base_url`: 服务端基地址，不带尾部斜杠。
    ///
    /// # Returns
    /// 成功返回实例，客户端构建失败返回 `ClientError::Transport`。
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// 非 2xx 响应折叠为 `ClientError::Status`
    async fn reject_error_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| String::from("<unreadable body>"));
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl CoreApi for HttpCoreApi {
    /// # Summary
    /// 调用 `GET /api/Core/GetYahoo?ticker=...` 拉取 K 线序列。
    async fn fetch_series(&self, ticker: &str) -> Result<Vec<Candle>, ClientError> {
        let url = format!("{}/api/Core/GetYahoo", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[("ticker", ticker)])
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let resp = Self::reject_error_status(resp).await?;

        resp.json::<Vec<Candle>>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// # Summary
    /// 调用 `POST /api/Core/PostYahoo` 请求合成目标序列。
    async fn compute_target(
        &self,
        ticker: &str,
        left_point: Decimal,
        right_point: Decimal,
    ) -> Result<Vec<GraphPoint>, ClientError> {
        let url = format!("{}/api/Core/PostYahoo", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&ComputeRequest {
                ticker,
                left_point,
                right_point,
            })
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let resp = Self::reject_error_status(resp).await?;

        resp.json::<Vec<GraphPoint>>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
