//! Ollama 兼容的本地 LLM 客户端
//!
//! 向 `/api/generate` 风格的接口发送非流式请求，读取响应中的 `response` 字段。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::env::EnvConfig;
use crate::translation::config::constants;
use crate::translation::error::{helpers, TranslationError, TranslationResult};

use super::TextTranslator;

/// 客户端配置
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// 生成接口完整地址
    pub endpoint: String,
    /// 模型名称
    pub model: String,
    /// 单次请求超时
    pub timeout: Duration,
    /// 采样温度，越低输出越稳定
    pub temperature: f32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: constants::DEFAULT_LLM_URL.to_string(),
            model: constants::DEFAULT_MODEL.to_string(),
            timeout: constants::DEFAULT_LLM_TIMEOUT,
            temperature: constants::DEFAULT_TEMPERATURE,
        }
    }
}

impl From<&EnvConfig> for OllamaConfig {
    fn from(env: &EnvConfig) -> Self {
        Self {
            endpoint: env.llm_url.clone(),
            model: env.model.clone(),
            timeout: env.llm_timeout,
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// 本地 LLM 翻译客户端
#[derive(Debug, Clone)]
pub struct OllamaClient {
    config: OllamaConfig,
    client: Client,
}

impl OllamaClient {
    /// 创建新的客户端
    pub fn new(config: OllamaConfig) -> TranslationResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| helpers::config_error(format!("创建HTTP客户端失败: {}", e)))?;

        Ok(Self { config, client })
    }

    /// 生成接口地址
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// 构造翻译提示词
    pub fn build_prompt(text: &str, source_lang: &str, target_lang: &str) -> String {
        format!(
            r#"Translate the following text from {source_lang} to {target_lang}.
Rules:
1. Output ONLY the translated text.
2. Do NOT add notes, explanations, or enclosing quotes.
3. Preserve the original meaning and tone.
4. If the text is a number or proper noun that shouldn't change, keep it as is.
5. If the translation is unclear, provide the most direct literal translation.

Text to translate:
"{text}""#
        )
    }
}

#[async_trait]
impl TextTranslator for OllamaClient {
    async fn translate_text(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt: Self::build_prompt(text, source_lang, target_lang),
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
            },
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                helpers::network_error(format!("发送请求失败: {}", e))
                    .with_context(&self.config.endpoint)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::ServiceError(format!(
                "LLM服务返回状态 {}: {}",
                status.as_u16(),
                body
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::ServiceError(format!("解析响应失败: {}", e)))?;

        tracing::trace!("LLM 返回 {} 字符", body.response.chars().count());

        Ok(body.response)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
