//! 翻译能力模块
//!
//! 定义单片段文本翻译的抽象接口，以及对接本地 LLM 服务的实现。
//! 翻译服务只依赖 `TextTranslator`，不关心提示词格式、传输协议或重试策略。

use async_trait::async_trait;

use crate::translation::error::TranslationResult;

pub mod ollama;

pub use ollama::{OllamaClient, OllamaConfig};

/// 单片段文本翻译能力
///
/// 实现必须可以被多个翻译单元并发调用。
#[async_trait]
pub trait TextTranslator: Send + Sync {
    /// 将一段文本从源语言翻译为目标语言
    async fn translate_text(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String>;

    /// 模型标识，写入翻译元数据
    fn model_name(&self) -> &str;
}
