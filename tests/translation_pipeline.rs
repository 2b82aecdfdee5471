//! 翻译管道集成测试
//!
//! 测试从解析到序列化的端到端翻译流程

use std::sync::Arc;
use std::time::Duration;

use xhtml_translator::translation::pipeline::collect_fragments;
use xhtml_translator::translation::{TranslationConfig, TranslationError, TranslationService};
use xhtml_translator::{html_to_dom, serialize_document};

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::{create_service, DomTestHelper, HtmlTestHelper, MockTranslator, PerformanceHelper};

/// 测试基本结构的翻译结果
#[tokio::test]
async fn test_translates_basic_structure() {
    let translator = Arc::new(MockTranslator::new());
    let service = create_service(translator.clone(), 5);

    let output = service
        .translate("<div><h1>Hello</h1><p>World</p></div>", "en", "es")
        .await
        .unwrap();

    assert_eq!(
        output.document,
        "<html><head></head><body><div><h1>TR:Hello</h1><p>TR:World</p></div></body></html>"
    );
    assert_eq!(translator.calls(), 2);
    assert_eq!(output.metadata.model, "mock-model");
}

/// 测试脚本内容保持不变
#[tokio::test]
async fn test_script_content_untouched() {
    let translator = Arc::new(MockTranslator::new());
    let service = create_service(translator.clone(), 5);

    let output = service
        .translate("<script>alert('x')</script>", "en", "es")
        .await
        .unwrap();

    assert!(output.document.contains("<script>alert('x')</script>"));
    assert!(!output.document.contains("TR:"));
    assert_eq!(translator.calls(), 0);
}

/// 测试被翻译的文本集合正好是可翻译片段集合
#[tokio::test]
async fn test_mutated_set_equals_eligible_set() {
    let html = HtmlTestHelper::create_complex_page();
    let translator = Arc::new(MockTranslator::new());
    let service = create_service(translator.clone(), 3);

    let output = service.translate(&html, "en", "de").await.unwrap();

    let dom = html_to_dom(&html).unwrap();
    let mut expected: Vec<String> = collect_fragments(&dom.document)
        .into_iter()
        .map(|fragment| fragment.text)
        .collect();
    let mut seen = translator.seen_texts();
    expected.sort();
    seen.sort();

    assert_eq!(seen, expected);
    assert_eq!(output.document.matches("TR:").count(), expected.len());
    assert!(seen.iter().all(|text| !text.trim().is_empty()));
}

/// 测试非文本节点、属性和树结构保持不变
#[tokio::test]
async fn test_preserves_markup_and_attributes() {
    let translator = Arc::new(MockTranslator::new());
    let service = create_service(translator, 5);

    let output = service
        .translate(
            r#"<div class="a" id="b"><a href="/x" title="T">Link</a><img src="i.png" alt="Alt"></div>"#,
            "en",
            "es",
        )
        .await
        .unwrap();

    assert_eq!(
        output.document,
        r#"<html><head></head><body><div class="a" id="b"><a href="/x" title="T">TR:Link</a><img src="i.png" alt="Alt"></div></body></html>"#
    );

    let html = HtmlTestHelper::create_complex_page();
    let translator = Arc::new(MockTranslator::new());
    let service = create_service(translator, 5);
    let output = service.translate(&html, "en", "es").await.unwrap();

    assert!(output.document.starts_with("<!DOCTYPE html>"));
    assert!(output.document.contains("<!-- navigation -->"));
    assert!(output.document.contains("<style>body { color: #333; }</style>"));
    assert!(output.document.contains(r#"var greeting = "hello";"#));
    assert!(output.document.contains(r#"<a href="/home" title="Home page">TR:Home</a>"#));
    assert!(output.document.contains(r#"alt="Company logo""#));
    assert!(output.document.contains("<em>TR:very</em>"));

    // 属性值不是文本节点，不参与翻译
    let dom = html_to_dom(&output.document).unwrap();
    let img = &DomTestHelper::find_elements(&dom.document, &["img"])[0];
    assert_eq!(DomTestHelper::attr(img, "alt").as_deref(), Some("Company logo"));
    let links = DomTestHelper::find_elements(&dom.document, &["nav", "a"]);
    assert_eq!(links.len(), 2);
    assert_eq!(DomTestHelper::attr(&links[1], "href").as_deref(), Some("/about"));
}

/// 测试模板元素内的文本同样被翻译并保留在输出中
#[tokio::test]
async fn test_template_contents_are_translated() {
    let translator = Arc::new(MockTranslator::new());
    let service = create_service(translator.clone(), 5);

    let output = service
        .translate(
            "<div><p>Out</p><template><p>Inside</p></template></div>",
            "en",
            "es",
        )
        .await
        .unwrap();

    assert_eq!(
        output.document,
        "<html><head></head><body><div><p>TR:Out</p><template><p>TR:Inside</p></template></div></body></html>"
    );
    assert_eq!(translator.calls(), 2);

    let dom = html_to_dom(&output.document).unwrap();
    assert_eq!(serialize_document(&dom).unwrap(), output.document);
}

/// 测试不同并发上限下结果一致
#[tokio::test]
async fn test_output_independent_of_concurrency_limit() {
    let html = HtmlTestHelper::create_complex_page();

    let sequential = create_service(
        Arc::new(MockTranslator::new().with_latency(Duration::from_millis(2))),
        1,
    );
    let parallel = create_service(
        Arc::new(MockTranslator::new().with_latency(Duration::from_millis(2))),
        20,
    );

    let first = sequential.translate(&html, "en", "fr").await.unwrap();
    let second = parallel.translate(&html, "en", "fr").await.unwrap();

    assert_eq!(first.document, second.document);
}

/// 测试并发上限生效且能缩短总耗时
#[tokio::test]
async fn test_concurrency_bounds_wall_clock_time() {
    let translator = Arc::new(MockTranslator::new().with_latency(Duration::from_millis(50)));
    let service = create_service(translator.clone(), 5);
    let html = HtmlTestHelper::paragraphs(6);

    let (result, elapsed) =
        PerformanceHelper::measure_async_time(|| service.translate(&html, "en", "es")).await;
    let output = result.unwrap();

    assert_eq!(translator.calls(), 6);
    assert!(translator.max_in_flight() <= 5);
    assert!(elapsed >= Duration::from_millis(100), "elapsed: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(250), "elapsed: {elapsed:?}");
    assert!(output.metadata.duration >= Duration::from_millis(100));
    assert!(output.document.contains("<p>TR:Paragraph 6</p>"));
}

/// 测试同时进行中的调用不超过上限
#[tokio::test]
async fn test_in_flight_never_exceeds_limit() {
    let translator = Arc::new(MockTranslator::new().with_latency(Duration::from_millis(10)));
    let service = create_service(translator.clone(), 3);

    service
        .translate(&HtmlTestHelper::paragraphs(20), "en", "es")
        .await
        .unwrap();

    assert_eq!(translator.calls(), 20);
    assert!(translator.max_in_flight() <= 3);
    assert!(translator.max_in_flight() > 1);
}

/// 测试没有可翻译文本时的行为
#[tokio::test]
async fn test_empty_body_makes_no_calls() {
    let translator = Arc::new(MockTranslator::new());
    let service = create_service(translator.clone(), 5);
    let html = "<html><head></head><body></body></html>";

    let output = service.translate(html, "en", "es").await.unwrap();

    assert_eq!(output.document, html);
    assert_eq!(translator.calls(), 0);
    assert_eq!(service.get_stats().snapshot().fragments_translated, 0);
}

/// 测试单个片段失败导致整体失败
#[tokio::test]
async fn test_single_failure_fails_whole_document() {
    let translator = Arc::new(MockTranslator::new().failing_on("World"));
    let service = create_service(translator.clone(), 5);

    let result = service
        .translate("<div><h1>Hello</h1><p>World</p></div>", "en", "es")
        .await;

    match result {
        Err(TranslationError::FragmentFailed { fragment_text, cause }) => {
            assert_eq!(fragment_text, "World");
            assert!(matches!(*cause, TranslationError::ServiceError(_)));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    // 其他单元仍然运行完毕
    assert_eq!(translator.calls(), 2);
}

/// 测试多个失败时报告片段顺序中的第一个
#[tokio::test]
async fn test_reports_first_failure_by_fragment_order() {
    let translator = Arc::new(
        MockTranslator::new()
            .failing_on("bad")
            .with_latency(Duration::from_millis(5)),
    );
    let service = create_service(translator, 5);

    let result = service
        .translate("<p>ok</p><p>bad one</p><p>bad two</p>", "en", "es")
        .await;

    match result {
        Err(TranslationError::FragmentFailed { fragment_text, .. }) => {
            assert_eq!(fragment_text, "bad one");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

/// 测试超时后返回取消错误
#[tokio::test]
async fn test_timeout_cancels_translation() {
    let translator = Arc::new(MockTranslator::new().with_latency(Duration::from_secs(10)));
    let config = TranslationConfig::default().with_timeout(Duration::from_millis(100));
    let service = TranslationService::new(translator.clone(), config).unwrap();

    let html = HtmlTestHelper::paragraphs(3);
    let (result, elapsed) = PerformanceHelper::measure_async_time(|| {
        service.translate(&html, "en", "es")
    })
    .await;

    assert!(matches!(result, Err(TranslationError::Cancelled(_))));
    assert!(elapsed < Duration::from_secs(2), "elapsed: {elapsed:?}");
    assert_eq!(translator.calls(), 3);
    assert_eq!(service.get_stats().snapshot().requests_failed, 1);
}

/// 测试调用方指定的超时优先于配置
#[tokio::test]
async fn test_caller_supplied_timeout() {
    let translator = Arc::new(MockTranslator::new().with_latency(Duration::from_millis(200)));
    let service = create_service(translator, 5);

    let result = service
        .translate_with_timeout("<p>slow</p>", "en", "es", Duration::from_millis(20))
        .await;

    assert!(matches!(result, Err(TranslationError::Cancelled(_))));
}

/// 测试调用方取消后放弃剩余片段
#[tokio::test]
async fn test_caller_cancellation_abandons_remaining_fragments() {
    let translator = Arc::new(MockTranslator::new().with_latency(Duration::from_millis(200)));
    let service = create_service(translator.clone(), 1);

    let html = HtmlTestHelper::paragraphs(4);
    let (result, elapsed) = PerformanceHelper::measure_async_time(|| {
        service.translate_until(
            &html,
            "en",
            "es",
            tokio::time::sleep(Duration::from_millis(50)),
        )
    })
    .await;

    assert!(matches!(result, Err(TranslationError::Cancelled(_))));
    assert!(elapsed < Duration::from_millis(200), "elapsed: {elapsed:?}");
    assert_eq!(translator.calls(), 1);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(translator.calls(), 1);
    assert_eq!(service.get_stats().snapshot().requests_failed, 1);
}

/// 测试序列化结果可以再次解析并保持稳定
#[tokio::test]
async fn test_translated_document_reparses() {
    let translator = Arc::new(MockTranslator::new().with_prefix("<&>"));
    let service = create_service(translator, 5);

    let output = service.translate("<p>a</p>", "en", "es").await.unwrap();
    assert!(output.document.contains("<p>&lt;&amp;&gt;a</p>"));

    let dom = html_to_dom(&output.document).unwrap();
    assert_eq!(serialize_document(&dom).unwrap(), output.document);
}
