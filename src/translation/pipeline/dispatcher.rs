//! 翻译分发器模块
//!
//! 对每个片段并发调用翻译能力，使用信号量作为准入闸门限制同时进行中的调用数。
//! 翻译成功的单元把结果直接写回自己片段对应的文本节点；
//! 不同片段对应不同节点，因此写回之间不存在竞争，DOM 本身无需加锁。
//!
//! 所有单元都会被等待完成后才返回，某个单元失败不会取消其他进行中的调用。

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::join_all;
use html5ever::tendril::StrTendril;
use markup5ever_rcdom::{Handle, NodeData};
use tokio::sync::Semaphore;

use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::llm::TextTranslator;

use super::collector::Fragment;

/// 单个片段的翻译结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentOutcome {
    /// 对应 `Fragment::id`
    pub id: usize,
    /// 成功时为已写回的译文，失败时为 `TranslationError::FragmentFailed`
    pub result: TranslationResult<String>,
}

impl FragmentOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// 分发统计
#[derive(Debug, Default)]
pub struct DispatchStats {
    started: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

/// 分发统计快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStatsSnapshot {
    pub started: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub peak_in_flight: usize,
}

impl DispatchStats {
    pub fn snapshot(&self) -> DispatchStatsSnapshot {
        DispatchStatsSnapshot {
            started: self.started.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            peak_in_flight: self.peak_in_flight.load(Ordering::Relaxed),
        }
    }
}

/// 进行中调用计数，析构时递减（包括被取消的情况）
struct InFlightGuard<'a> {
    stats: &'a DispatchStats,
}

impl<'a> InFlightGuard<'a> {
    fn enter(stats: &'a DispatchStats) -> Self {
        stats.started.fetch_add(1, Ordering::Relaxed);
        let current = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        stats.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        Self { stats }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.stats.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// 翻译分发器
#[derive(Debug)]
pub struct Dispatcher {
    max_concurrent_requests: usize,
    stats: DispatchStats,
}

impl Dispatcher {
    /// 创建分发器，并发上限必须为正数
    pub fn new(max_concurrent_requests: usize) -> TranslationResult<Self> {
        if max_concurrent_requests == 0 {
            return Err(TranslationError::ConfigError("最大并发数不能为0".to_string()));
        }

        Ok(Self {
            max_concurrent_requests,
            stats: DispatchStats::default(),
        })
    }

    pub fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
    }

    pub fn stats(&self) -> DispatchStatsSnapshot {
        self.stats.snapshot()
    }

    /// 并发翻译所有片段并写回 DOM
    ///
    /// 返回值与 `fragments` 一一对应、顺序相同。
    pub async fn dispatch(
        &self,
        fragments: &[Fragment],
        translator: &dyn TextTranslator,
        source_lang: &str,
        target_lang: &str,
    ) -> Vec<FragmentOutcome> {
        if fragments.is_empty() {
            return Vec::new();
        }

        tracing::info!(
            "开始分发 {} 个翻译片段，并发上限 {}",
            fragments.len(),
            self.max_concurrent_requests
        );

        let semaphore = Semaphore::new(self.max_concurrent_requests);

        let units = fragments.iter().map(|fragment| {
            let semaphore = &semaphore;
            let stats = &self.stats;

            async move {
                let result = Self::run_unit(
                    fragment,
                    semaphore,
                    stats,
                    translator,
                    source_lang,
                    target_lang,
                )
                .await;

                match &result {
                    Ok(_) => {
                        stats.succeeded.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(e) => {
                        stats.failed.fetch_add(1, Ordering::Relaxed);
                        tracing::debug!("片段 {} 翻译失败: {}", fragment.id, e);
                    }
                }

                FragmentOutcome {
                    id: fragment.id,
                    result,
                }
            }
        });

        let outcomes = join_all(units).await;

        let snapshot = self.stats.snapshot();
        tracing::info!(
            "片段分发完成: 成功 {}, 失败 {}, 最大并发 {}",
            snapshot.succeeded,
            snapshot.failed,
            snapshot.peak_in_flight
        );

        outcomes
    }

    async fn run_unit(
        fragment: &Fragment,
        semaphore: &Semaphore,
        stats: &DispatchStats,
        translator: &dyn TextTranslator,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String> {
        // 许可在作用域结束时释放，无论成功、失败还是被取消
        let _permit = semaphore.acquire().await.map_err(|e| {
            TranslationError::fragment_failed(
                fragment.text.clone(),
                TranslationError::InternalError(format!("获取并发许可失败: {}", e)),
            )
        })?;
        let _in_flight = InFlightGuard::enter(stats);

        tracing::trace!(
            "翻译片段 {} <{}> ({} 字符)",
            fragment.id,
            fragment.parent_tag.as_deref().unwrap_or("-"),
            fragment.char_count()
        );

        let translated = translator
            .translate_text(&fragment.text, source_lang, target_lang)
            .await
            .map_err(|e| TranslationError::fragment_failed(fragment.text.clone(), e))?;

        write_text(&fragment.node, &translated);
        Ok(translated)
    }
}

/// 替换文本节点内容，非文本节点保持不变
fn write_text(node: &Handle, text: &str) {
    if let NodeData::Text { ref contents } = node.data {
        *contents.borrow_mut() = StrTendril::from_slice(text);
    }
}
