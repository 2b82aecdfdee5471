//! 翻译模块
//!
//! 提供文档翻译功能，采用模块化架构：
//! - **core**: 翻译服务外观
//! - **pipeline**: 文本收集、并发分发、结果汇总
//! - **llm**: 可插拔的文本翻译能力及本地 LLM 客户端
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xhtml_translator::translation::{OllamaClient, OllamaConfig, TranslationConfig, TranslationService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(OllamaClient::new(OllamaConfig::default())?);
//! let service = TranslationService::new(client, TranslationConfig::default().with_concurrency(8))?;
//!
//! let output = service.translate("<p>Hello</p>", "en", "fr").await?;
//! println!("{}", output.document);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// 子模块声明
// ============================================================================

/// 配置管理模块 - 并发上限、超时和跳过的元素
pub mod config;

/// 核心翻译服务模块
pub mod core;

/// 错误处理模块 - 统一的错误类型和处理机制
pub mod error;

/// 翻译能力模块 - `TextTranslator` 接口与 Ollama 客户端
pub mod llm;

/// 文本处理管道模块 - 收集、分发和汇总
pub mod pipeline;

// ============================================================================
// 公共接口重新导出
// ============================================================================

pub use config::TranslationConfig;
pub use self::core::{Metadata, ServiceStats, TranslationOutput, TranslationService};
pub use error::{ErrorCategory, ErrorSeverity, TranslationError, TranslationResult};
pub use llm::{OllamaClient, OllamaConfig, TextTranslator};
pub use pipeline::{Dispatcher, Fragment, FragmentOutcome, TextCollector};
