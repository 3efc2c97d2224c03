use thiserror::Error;

/// # Summary
/// 行情域错误枚举。区分"上游失败"与"查无数据"两类结局，
/// HTTP 边界据此决定状态码，不得把失败降级成空序列。
#[derive(Error, Debug)]
pub enum MarketError {
    // 网络层错误，包含底层 HTTP 客户端错误信息
    #[error("Network error: {0}")]
    Network(String),
    // 数据解析错误，如 JSON 格式不匹配
    #[error("Parse error: {0}")]
    Parse(String),
    // 请求的代码不存在或该区间无任何数据
    #[error("No data found for the requested ticker")]
    NotFound,
    // 上游返回的未分类错误
    #[error("Unknown error: {0}")]
    Unknown(String),
}
