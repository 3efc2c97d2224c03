//! # DTO (Data Transfer Object) 层
//!
//! 面向前端 JSON 输入输出的轻量结构体。成功响应直接返回领域实体的
//! 裸数组（与旧版服务端契约逐字节兼容），本模块只承载请求体与错误体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// 目标序列合成请求体 (camelCase 线上格式)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetRequest {
    /// 证券代码
    #[schema(example = "AAPL")]
    pub ticker: String,
    /// 左锚点：输出序列首位次的目标值
    #[schema(example = 100.0)]
    pub left_point: Decimal,
    /// 右锚点：输出序列末位次的目标值
    #[schema(example = 130.0)]
    pub right_point: Decimal,
}

/// 统一失败响应体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
    /// 字段级校验错误 (线上字段名 -> 文案)，仅锚点校验失败时出现
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
            fields: None,
        }
    }

    /// 携带字段级错误构建
    pub fn with_fields(msg: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
            fields: Some(fields),
        }
    }
}
