//! # XHTML Translator Library
//!
//! 翻译 (X)HTML 文档中的可读文本，保持标记结构、属性和非文本元素不变。
//!
//! ## 模块组织
//!
//! - `env` - 类型安全的环境变量配置
//! - `parsers` - HTML 解析与序列化
//! - `translation` - 文本收集、并发分发、结果汇总和翻译服务
//! - `web` - Web服务器功能（可选）

pub mod env;
pub mod parsers;
pub mod translation;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used items for convenience
pub use parsers::{html_to_dom, serialize_document};
pub use translation::{
    Metadata, OllamaClient, TextTranslator, TranslationConfig, TranslationError,
    TranslationOutput, TranslationResult, TranslationService,
};
