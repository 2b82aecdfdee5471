//! 翻译配置管理模块
//!
//! 并发上限、超时等参数显式地通过 `TranslationConfig` 传入翻译服务，
//! 进程级默认值来自环境变量（见 `crate::env`）。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::env::{EnvConfig, EnvResult};
use crate::translation::error::{TranslationError, TranslationResult};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    /// 同时进行中的翻译调用上限
    pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 5;

    /// 整个文档翻译的超时
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5 * 60);

    // 默认LLM设置
    pub const DEFAULT_LLM_URL: &str = "http://localhost:11434/api/generate";
    pub const DEFAULT_MODEL: &str = "google/translategemma-4b-it";
    pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(60);
    pub const DEFAULT_TEMPERATURE: f32 = 0.1;

    // 跳过的元素
    pub const SKIP_ELEMENTS: &[&str] = crate::parsers::html::NON_TRANSLATABLE_TAGS;
}

/// 翻译服务配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslationConfig {
    /// 并发翻译调用上限（准入闸门容量）
    pub max_concurrent_requests: usize,
    /// 整个翻译任务的超时
    pub request_timeout: Duration,
    /// 直接文本子节点不参与翻译的元素
    pub skip_tags: Vec<String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: constants::DEFAULT_MAX_CONCURRENT_REQUESTS,
            request_timeout: constants::DEFAULT_REQUEST_TIMEOUT,
            skip_tags: constants::SKIP_ELEMENTS
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
        }
    }
}

impl TranslationConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self::from(&EnvConfig::from_env()?))
    }

    /// 设置并发上限
    pub fn with_concurrency(mut self, max_concurrent_requests: usize) -> Self {
        self.max_concurrent_requests = max_concurrent_requests;
        self
    }

    /// 设置整体超时
    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.max_concurrent_requests == 0 {
            return Err(TranslationError::ConfigError("最大并发数不能为0".to_string()));
        }

        if self.request_timeout.is_zero() {
            return Err(TranslationError::ConfigError("超时时间必须大于0".to_string()));
        }

        Ok(())
    }
}

impl From<&EnvConfig> for TranslationConfig {
    fn from(env: &EnvConfig) -> Self {
        Self {
            max_concurrent_requests: env.max_concurrent_requests,
            request_timeout: env.request_timeout,
            ..Self::default()
        }
    }
}
