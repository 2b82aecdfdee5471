// 集成测试公共模块
//
// 提供可配置的模拟翻译能力和 HTML 测试数据

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use markup5ever_rcdom::{Handle, NodeData};

use xhtml_translator::translation::{
    TextTranslator, TranslationConfig, TranslationError, TranslationResult, TranslationService,
};

/// 模拟翻译能力
///
/// 默认给文本加 `TR:` 前缀；可配置延迟和失败条件，并记录调用次数与最大并发数。
pub struct MockTranslator {
    model: String,
    prefix: String,
    latency: Duration,
    fail_on: Option<String>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

struct InFlight<'a>(&'a MockTranslator);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockTranslator {
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_string(),
            prefix: "TR:".to_string(),
            latency: Duration::ZERO,
            fail_on: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// 文本包含 `needle` 时返回 `ServiceError`
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// 收到的所有文本（按完成调用的先后排列）
    pub fn seen_texts(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextTranslator for MockTranslator {
    async fn translate_text(
        &self,
        text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> TranslationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlight(self);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.seen.lock().unwrap().push(text.to_string());

        if let Some(ref needle) = self.fail_on {
            if text.contains(needle.as_str()) {
                return Err(TranslationError::ServiceError(format!(
                    "mock failure for '{}'",
                    text
                )));
            }
        }

        Ok(format!("{}{}", self.prefix, text))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// 用给定的模拟能力和并发上限创建服务
pub fn create_service(
    translator: Arc<MockTranslator>,
    max_concurrent_requests: usize,
) -> TranslationService {
    let config = TranslationConfig::default().with_concurrency(max_concurrent_requests);
    TranslationService::new(translator, config).unwrap()
}

/// HTML 测试数据
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    /// `count` 个段落
    pub fn paragraphs(count: usize) -> String {
        (1..=count)
            .map(|i| format!("<p>Paragraph {}</p>", i))
            .collect()
    }

    /// 包含样式、脚本、属性和空白的完整页面
    pub fn create_complex_page() -> String {
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Sample Page</title>
    <style>body { color: #333; }</style>
</head>
<body>
    <!-- navigation -->
    <nav class="menu"><a href="/home" title="Home page">Home</a> | <a href="/about">About us</a></nav>
    <main id="content">
        <h1>Welcome</h1>
        <p>This is <em>very</em> important.</p>
        <img src="logo.png" alt="Company logo">
        <script>var greeting = "hello";</script>
        <ul><li>First</li><li>Second</li></ul>
    </main>
</body>
</html>"#
            .to_string()
    }
}

/// DOM 查询辅助
pub struct DomTestHelper;

impl DomTestHelper {
    /// 按祖先到后代的标签路径查找元素，例如 `["nav", "a"]`
    pub fn find_elements(node: &Handle, path: &[&str]) -> Vec<Handle> {
        let mut found = Vec::new();
        let Some((first, rest)) = path.split_first() else {
            return found;
        };

        if let NodeData::Element { ref name, .. } = node.data {
            if &*name.local == *first {
                if rest.is_empty() {
                    found.push(node.clone());
                } else {
                    for child in node.children.borrow().iter() {
                        found.extend(Self::find_elements(child, rest));
                    }
                }
                return found;
            }
        }

        for child in node.children.borrow().iter() {
            found.extend(Self::find_elements(child, path));
        }
        found
    }

    pub fn attr(node: &Handle, attr_name: &str) -> Option<String> {
        match node.data {
            NodeData::Element { ref attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|attr| &*attr.name.local == attr_name)
                .map(|attr| attr.value.to_string()),
            _ => None,
        }
    }
}

/// 性能测试辅助
pub struct PerformanceHelper;

impl PerformanceHelper {
    pub async fn measure_async_time<F, Fut, T>(f: F) -> (T, Duration)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let start = Instant::now();
        let result = f().await;
        (result, start.elapsed())
    }
}
