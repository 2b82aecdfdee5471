//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use std::fmt;

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 文档解析错误
    #[error("解析XHTML失败: {0}")]
    ParseError(String),

    /// 单个文本片段翻译失败，整个翻译任务随之失败
    #[error("片段翻译失败 ({fragment_text:?}): {cause}")]
    FragmentFailed {
        fragment_text: String,
        cause: Box<TranslationError>,
    },

    /// 序列化错误
    #[error("渲染翻译后的XHTML失败: {0}")]
    SerializationError(String),

    /// 超时或调用方取消
    #[error("翻译已取消: {0}")]
    Cancelled(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 翻译服务（LLM）返回的错误
    #[error("翻译服务错误: {0}")]
    ServiceError(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl TranslationError {
    /// 包装某个片段的底层错误
    pub fn fragment_failed(fragment_text: impl Into<String>, cause: TranslationError) -> Self {
        TranslationError::FragmentFailed {
            fragment_text: fragment_text.into(),
            cause: Box::new(cause),
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::InvalidInput(_) => ErrorSeverity::Info,
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::ParseError(_) => ErrorSeverity::Error,
            TranslationError::FragmentFailed { cause, .. } => cause.severity(),
            TranslationError::SerializationError(_) => ErrorSeverity::Error,
            TranslationError::Cancelled(_) => ErrorSeverity::Warning,
            TranslationError::NetworkError(_) => ErrorSeverity::Warning,
            TranslationError::ServiceError(_) => ErrorSeverity::Error,
            TranslationError::InternalError(_) => ErrorSeverity::Critical,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::InvalidInput(_) => ErrorCategory::Input,
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::ParseError(_) => ErrorCategory::Parsing,
            TranslationError::FragmentFailed { .. } => ErrorCategory::Translation,
            TranslationError::SerializationError(_) => ErrorCategory::Serialization,
            TranslationError::Cancelled(_) => ErrorCategory::Cancellation,
            TranslationError::NetworkError(_) => ErrorCategory::Network,
            TranslationError::ServiceError(_) => ErrorCategory::Service,
            TranslationError::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(self, context: T) -> Self {
        let new_msg = |msg: &str| format!("{} (上下文: {})", msg, context);

        match self {
            TranslationError::InvalidInput(msg) => TranslationError::InvalidInput(new_msg(&msg)),
            TranslationError::ConfigError(msg) => TranslationError::ConfigError(new_msg(&msg)),
            TranslationError::ParseError(msg) => TranslationError::ParseError(new_msg(&msg)),
            TranslationError::SerializationError(msg) => {
                TranslationError::SerializationError(new_msg(&msg))
            }
            TranslationError::Cancelled(msg) => TranslationError::Cancelled(new_msg(&msg)),
            TranslationError::NetworkError(msg) => TranslationError::NetworkError(new_msg(&msg)),
            TranslationError::ServiceError(msg) => TranslationError::ServiceError(new_msg(&msg)),
            TranslationError::InternalError(msg) => TranslationError::InternalError(new_msg(&msg)),
            TranslationError::FragmentFailed {
                fragment_text,
                cause,
            } => TranslationError::FragmentFailed {
                fragment_text,
                cause: Box::new(cause.with_context(context)),
            },
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Parsing,
    Translation,
    Serialization,
    Cancellation,
    Network,
    Service,
    Internal,
}

impl ErrorCategory {
    /// 对外暴露的分类名称
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Input => "invalid_input",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Parsing => "parse_failure",
            ErrorCategory::Translation => "translation_failure",
            ErrorCategory::Serialization => "serialization_failure",
            ErrorCategory::Cancellation => "cancellation",
            ErrorCategory::Network => "network",
            ErrorCategory::Service => "service",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 翻译结果类型
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 记录并返回错误
    pub fn log_error<T>(error: TranslationError) -> TranslationResult<T> {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("翻译信息: {}", error),
            ErrorSeverity::Warning => tracing::warn!("翻译警告: {}", error),
            ErrorSeverity::Error => tracing::error!("翻译错误: {}", error),
            ErrorSeverity::Critical => tracing::error!("翻译严重错误: {}", error),
        }

        Err(error)
    }

    /// 创建网络错误
    pub fn network_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::NetworkError(msg.to_string())
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ConfigError(msg.to_string())
    }

    /// 创建输入验证错误
    pub fn validation_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::InvalidInput(msg.to_string())
    }

    /// 创建内部错误
    pub fn internal_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::InternalError(msg.to_string())
    }
}
