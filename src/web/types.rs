//! Web 模块的数据类型定义

use std::sync::Arc;

use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use crate::translation::{
    core::ServiceStatsSnapshot, ErrorCategory, Metadata, TranslationError, TranslationService,
};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TranslationService>,
}

/// 翻译请求
///
/// 缺失字段反序列化为空字符串，由处理器统一报告为缺少必填字段。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub xhtml: String,
    #[serde(default)]
    pub source_lang: String,
    #[serde(default)]
    pub target_lang: String,
}

/// 翻译响应
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslateResponse {
    pub translated_xhtml: String,
    pub metadata: Metadata,
}

/// 错误响应
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub category: String,
}

/// 健康检查响应
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub max_concurrent_requests: usize,
    pub stats: ServiceStatsSnapshot,
}

/// 处理器错误类型
pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl ErrorResponse {
    pub fn new(error: impl Into<String>, category: ErrorCategory) -> Self {
        Self {
            error: error.into(),
            category: category.as_str().to_string(),
        }
    }
}

/// 按错误类别选择 HTTP 状态码
pub fn status_for(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::Input => StatusCode::BAD_REQUEST,
        ErrorCategory::Parsing => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCategory::Cancellation => StatusCode::GATEWAY_TIMEOUT,
        ErrorCategory::Translation | ErrorCategory::Network | ErrorCategory::Service => {
            StatusCode::BAD_GATEWAY
        }
        ErrorCategory::Configuration | ErrorCategory::Serialization | ErrorCategory::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// 将翻译错误转换为 HTTP 错误响应
pub fn api_error(error: TranslationError) -> ApiError {
    let category = error.category();
    (
        status_for(category),
        Json(ErrorResponse::new(error.to_string(), category)),
    )
}
