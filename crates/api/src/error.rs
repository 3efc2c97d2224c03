//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 JSON 响应体。
//! 映射规则：查无数据 404；锚点校验失败 400（带字段级文案）；
//! 上游数据源失败 502（不与"查无数据"混为一谈）；管线前置条件
//! 被破坏（序列过短、长度不匹配）说明上游数据畸形，按 500 大声失败。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::collections::BTreeMap;
use thiserror::Error;

use kassou_core::market::error::MarketError;
use kassou_core::target::entity::BoundaryViolation;
use kassou_core::target::error::TargetError;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 请求参数错误 (400)
    #[error("请求参数错误: {0}")]
    BadRequest(String),

    /// 锚点校验失败 (400, 带字段级文案)
    #[error("锚点校验失败")]
    Validation(Vec<BoundaryViolation>),

    /// 资源未找到 (404)
    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 上游数据源失败 (502)
    #[error("上游数据源失败: {0}")]
    Upstream(String),

    /// 下层业务错误 (500)
    #[error("内部服务错误: {0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiErrorResponse::from_msg(msg.clone()))
            }
            ApiError::Validation(violations) => {
                let fields: BTreeMap<String, String> = violations
                    .iter()
                    .map(|v| (v.field.wire_name().to_string(), v.message.clone()))
                    .collect();
                (
                    StatusCode::BAD_REQUEST,
                    ApiErrorResponse::with_fields("Boundary validation failed", fields),
                )
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ApiErrorResponse::from_msg(msg.clone()))
            }
            ApiError::Upstream(msg) => {
                // 上游失败值得告警，但不是本服务的缺陷
                tracing::warn!("上游数据源失败: {}", msg);
                (StatusCode::BAD_GATEWAY, ApiErrorResponse::from_msg(msg.clone()))
            }
            ApiError::Internal(msg) => {
                // 内部错误只记录日志，不向客户端透传细节
                tracing::error!("内部服务错误: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::from_msg("Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// 从 `MarketError` 转换：查无数据走 404，其余都是上游失败
impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        match &err {
            MarketError::NotFound => ApiError::NotFound(err.to_string()),
            MarketError::Network(_) | MarketError::Parse(_) | MarketError::Unknown(_) => {
                ApiError::Upstream(err.to_string())
            }
        }
    }
}

/// 从 `TargetError` 转换：校验失败带字段下放 400，
/// 空序列归入"查无数据"，前置条件破坏按内部错误处理
impl From<TargetError> for ApiError {
    fn from(err: TargetError) -> Self {
        match err {
            TargetError::Boundary(violations) => ApiError::Validation(violations),
            TargetError::EmptySeries => ApiError::NotFound(MarketError::NotFound.to_string()),
            precondition @ (TargetError::TooShort(_) | TargetError::LengthMismatch { .. }) => {
                ApiError::Internal(precondition.to_string())
            }
        }
    }
}
