//! 翻译服务核心实现
//!
//! 本模块提供统一的翻译服务接口，按顺序协调各个子系统：
//!
//! 1. 解析文档为 DOM
//! 2. 收集可翻译片段
//! 3. 在并发上限内分发翻译并就地写回
//! 4. 汇总结果（全部成功或整体失败）
//! 5. 序列化 DOM 并附带元数据
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xhtml_translator::translation::{OllamaClient, OllamaConfig, TranslationConfig, TranslationService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new(OllamaConfig::default())?;
//! let service = TranslationService::new(Arc::new(client), TranslationConfig::default())?;
//!
//! let output = service.translate("<p>Hello</p>", "en", "es").await?;
//! println!("{} ({:?})", output.document, output.metadata.duration);
//! # Ok(())
//! # }
//! ```
//!
//! ## 线程安全
//!
//! DOM 基于 `Rc`，因此 `translate` 返回的 future 不是 `Send`；
//! 需要在多线程运行时中使用时，可放到 `spawn_blocking` 中通过 `Handle::block_on` 驱动。

use std::future::{self, Future};
use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parsers::html::{html_to_dom, serialize_document};
use crate::translation::{
    config::TranslationConfig,
    error::{helpers, TranslationError, TranslationResult},
    llm::TextTranslator,
    pipeline::{aggregate, CollectorConfig, Dispatcher, TextCollector},
};

/// 翻译过程的元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// 从调用开始到完成的耗时，序列化为纳秒整数
    #[serde(with = "duration_nanos")]
    pub duration: Duration,
    /// 翻译能力自报的模型标识
    pub model: String,
    /// 完成时间
    pub timestamp: DateTime<Utc>,
}

/// 翻译结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutput {
    /// 翻译后的完整文档
    pub document: String,
    pub metadata: Metadata,
}

mod duration_nanos {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        serializer.serialize_u64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_nanos(u64::deserialize(deserializer)?))
    }
}

/// 统一的翻译服务
///
/// 持有注入的翻译能力和显式配置，可通过 `Arc` 在多个请求之间共享。
pub struct TranslationService {
    /// 翻译能力，必须支持并发调用
    translator: Arc<dyn TextTranslator>,

    /// 并发上限、超时、跳过的元素
    config: TranslationConfig,

    /// 服务统计信息
    stats: ServiceStats,
}

impl TranslationService {
    /// 创建新的翻译服务实例
    ///
    /// # 错误
    ///
    /// 配置无效（例如并发上限为0）时返回 `TranslationError::ConfigError`。
    pub fn new(
        translator: Arc<dyn TextTranslator>,
        config: TranslationConfig,
    ) -> TranslationResult<Self> {
        config.validate()?;

        Ok(Self {
            translator,
            config,
            stats: ServiceStats::default(),
        })
    }

    /// 使用默认配置创建服务
    pub fn with_defaults(translator: Arc<dyn TextTranslator>) -> Self {
        Self {
            translator,
            config: TranslationConfig::default(),
            stats: ServiceStats::default(),
        }
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn model_name(&self) -> &str {
        self.translator.model_name()
    }

    pub fn get_stats(&self) -> &ServiceStats {
        &self.stats
    }

    /// 翻译文档，整体受 `TranslationConfig::request_timeout` 约束
    pub async fn translate(
        &self,
        document: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<TranslationOutput> {
        self.translate_with_timeout(document, source_lang, target_lang, self.config.request_timeout)
            .await
    }

    /// 使用调用方指定的超时翻译文档
    ///
    /// 超时后所有进行中的翻译调用被丢弃，返回 `TranslationError::Cancelled`，不返回部分结果。
    pub async fn translate_with_timeout(
        &self,
        document: &str,
        source_lang: &str,
        target_lang: &str,
        timeout: Duration,
    ) -> TranslationResult<TranslationOutput> {
        self.execute(document, source_lang, target_lang, timeout, future::pending())
            .await
    }

    /// 翻译文档，`cancelled` 完成时放弃整个翻译
    ///
    /// 进行中的翻译调用随之被丢弃，不再发起新的调用，返回 `TranslationError::Cancelled`。
    /// 配置的超时仍然生效。
    pub async fn translate_until<F>(
        &self,
        document: &str,
        source_lang: &str,
        target_lang: &str,
        cancelled: F,
    ) -> TranslationResult<TranslationOutput>
    where
        F: Future<Output = ()>,
    {
        self.execute(
            document,
            source_lang,
            target_lang,
            self.config.request_timeout,
            cancelled,
        )
        .await
    }

    async fn execute<F>(
        &self,
        document: &str,
        source_lang: &str,
        target_lang: &str,
        timeout: Duration,
        cancelled: F,
    ) -> TranslationResult<TranslationOutput>
    where
        F: Future<Output = ()>,
    {
        let start_time = Instant::now();
        self.stats.requests_total.fetch_add(1, Ordering::Relaxed);

        tracing::info!(
            "开始翻译文档: {} 字节, {} -> {}",
            document.len(),
            source_lang,
            target_lang
        );

        let result = tokio::select! {
            outcome = tokio::time::timeout(
                timeout,
                self.run(document, source_lang, target_lang, start_time),
            ) => match outcome {
                Ok(result) => result,
                Err(_) => Err(TranslationError::Cancelled(format!(
                    "超过 {:.1} 秒未完成",
                    timeout.as_secs_f32()
                ))),
            },
            () = cancelled => Err(TranslationError::Cancelled("调用方已取消".to_string())),
        };

        self.stats.add_processing_time(start_time.elapsed());
        match result {
            Ok(output) => {
                self.stats.requests_succeeded.fetch_add(1, Ordering::Relaxed);
                tracing::info!("文档翻译完成，耗时: {:?}", output.metadata.duration);
                Ok(output)
            }
            Err(e) => {
                self.stats.requests_failed.fetch_add(1, Ordering::Relaxed);
                helpers::log_error(e)
            }
        }
    }

    async fn run(
        &self,
        document: &str,
        source_lang: &str,
        target_lang: &str,
        start_time: Instant,
    ) -> TranslationResult<TranslationOutput> {
        validate_request(document, source_lang, target_lang)?;

        let dom = html_to_dom(document)?;

        let mut collector = TextCollector::new(CollectorConfig {
            skip_tags: self.config.skip_tags.clone(),
        });
        let fragments = collector.collect_fragments(&dom.document);
        if fragments.is_empty() {
            tracing::info!("没有找到需要翻译的文本");
        }

        let dispatcher = Dispatcher::new(self.config.max_concurrent_requests)?;
        let outcomes = dispatcher
            .dispatch(&fragments, self.translator.as_ref(), source_lang, target_lang)
            .await;

        let summary = aggregate(outcomes)?;
        self.stats
            .fragments_translated
            .fetch_add(summary.translated, Ordering::Relaxed);

        let translated = serialize_document(&dom)?;

        Ok(TranslationOutput {
            document: translated,
            metadata: Metadata {
                duration: start_time.elapsed(),
                model: self.translator.model_name().to_string(),
                timestamp: Utc::now(),
            },
        })
    }
}

/// 校验翻译请求：文档和两种语言都不能为空字符串
///
/// 只含空白的文档仍是合法输入，解析后没有可翻译文本。
pub fn validate_request(
    document: &str,
    source_lang: &str,
    target_lang: &str,
) -> TranslationResult<()> {
    let missing: Vec<&str> = [
        ("xhtml", document),
        ("source_lang", source_lang),
        ("target_lang", target_lang),
    ]
    .iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| *name)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(helpers::validation_error(format!(
            "缺少必填字段: {}",
            missing.join(", ")
        )))
    }
}

/// 服务统计信息
///
/// 使用原子操作，可在共享引用下更新。
#[derive(Debug, Default)]
pub struct ServiceStats {
    pub requests_total: AtomicUsize,
    pub requests_succeeded: AtomicUsize,
    pub requests_failed: AtomicUsize,
    pub fragments_translated: AtomicUsize,
    processing_time_ms: AtomicU64,
}

/// 服务统计快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServiceStatsSnapshot {
    pub requests_total: usize,
    pub requests_succeeded: usize,
    pub requests_failed: usize,
    pub fragments_translated: usize,
    pub processing_time_ms: u64,
}

impl ServiceStats {
    pub fn add_processing_time(&self, duration: Duration) {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.processing_time_ms.fetch_add(millis, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ServiceStatsSnapshot {
        ServiceStatsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_succeeded: self.requests_succeeded.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            fragments_translated: self.fragments_translated.load(Ordering::Relaxed),
            processing_time_ms: self.processing_time_ms.load(Ordering::Relaxed),
        }
    }
}
