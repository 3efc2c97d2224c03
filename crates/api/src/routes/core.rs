//! # 核心数据路由控制器
//!
//! 实现 `/api/Core` 路径下的两个接口：拉取近一年的月线序列，
//! 以及基于左右锚点合成目标序列。两个接口的成功响应体都是
//! 裸数组，错误响应体统一为 [`ApiErrorResponse`]。

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use kassou_core::market::entity::Candle;
use kassou_core::market::error::MarketError;
use kassou_core::target::entity::{BoundaryPoints, GraphPoint};

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiErrorResponse, TargetRequest};

// ============================================================
//  Handler 实现
// ============================================================

#[derive(Deserialize, utoipa::ToSchema)]
pub struct GetYahooQuery {
    pub ticker: Option<String>,
}

/// 拉取指定股票近一年的月线序列
///
/// 按代码向上游行情源请求月线数据，返回按时间升序的 K 线数组。
/// 对应前端输入表格与图表中的 "Stock price" 数据列。
#[utoipa::path(
    get,
    path = "/api/Core/GetYahoo",
    tag = "核心 (Core)",
    params(
        ("ticker" = Option<String>, Query, description = "股票代码，如 AAPL")
    ),
    responses(
        (status = 200, description = "月线序列获取成功", body = Vec<Candle>),
        (status = 400, description = "缺少或空白的 ticker 参数", body = ApiErrorResponse),
        (status = 404, description = "查无此代码的数据", body = ApiErrorResponse),
        (status = 502, description = "上游数据源失败", body = ApiErrorResponse)
    )
)]
pub async fn get_yahoo(
    State(state): State<AppState>,
    Query(query): Query<GetYahooQuery>,
) -> Result<Json<Vec<Candle>>, ApiError> {
    let ticker = query.ticker.as_deref().unwrap_or("").trim();
    if ticker.is_empty() {
        tracing::warn!("GetYahoo 请求缺少 ticker 参数");
        return Err(ApiError::BadRequest("ticker is required".to_string()));
    }

    let candles = state.provider.fetch_trailing_year(ticker).await?;
    if candles.is_empty() {
        return Err(ApiError::NotFound(MarketError::NotFound.to_string()));
    }

    Ok(Json(candles))
}

/// 基于左右锚点合成目标序列
///
/// 先拉取该代码近一年的月线，校验左右锚点后逐月插值，
/// 返回与输入序列等长的目标点数组。对应前端图表中的 "Output" 数据列。
#[utoipa::path(
    post,
    path = "/api/Core/PostYahoo",
    tag = "核心 (Core)",
    request_body = TargetRequest,
    responses(
        (status = 200, description = "目标序列合成成功", body = Vec<GraphPoint>),
        (status = 400, description = "参数缺失或锚点校验失败", body = ApiErrorResponse),
        (status = 404, description = "查无此代码的数据", body = ApiErrorResponse),
        (status = 502, description = "上游数据源失败", body = ApiErrorResponse)
    )
)]
pub async fn post_yahoo(
    State(state): State<AppState>,
    Json(req): Json<TargetRequest>,
) -> Result<Json<Vec<GraphPoint>>, ApiError> {
    let ticker = req.ticker.trim();
    if ticker.is_empty() {
        tracing::warn!("PostYahoo 请求缺少 ticker 参数");
        return Err(ApiError::BadRequest("ticker is required".to_string()));
    }

    let candles = state.provider.fetch_trailing_year(ticker).await?;
    if candles.is_empty() {
        return Err(ApiError::NotFound(MarketError::NotFound.to_string()));
    }

    let points = BoundaryPoints {
        left_point: req.left_point,
        right_point: req.right_point,
    };
    let output = kassou_synth::synthesize(&candles, points)?;

    Ok(Json(output))
}
