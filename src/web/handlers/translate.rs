//! 文档翻译 API 处理器

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json as ExtractJson, State},
    http::StatusCode,
    response::Json,
};
use tokio::{runtime::Handle, sync::oneshot, task};

use crate::translation::{
    core::validate_request, error::helpers, ErrorCategory, TranslationOutput, TranslationResult,
    TranslationService,
};
use crate::web::types::{
    api_error, ApiError, AppState, ErrorResponse, TranslateRequest, TranslateResponse,
};

/// 翻译 XHTML 文档
///
/// 请求体为 `{xhtml, source_lang, target_lang}`，三个字段都必须非空。
/// 成功时返回译文和元数据；失败时返回 `{error, category}`，状态码由错误类别决定。
pub async fn translate_document(
    State(state): State<Arc<AppState>>,
    payload: Result<ExtractJson<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let ExtractJson(request) = payload.map_err(|rejection| {
        tracing::warn!("无法解析请求体: {}", rejection);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid request body", ErrorCategory::Input)),
        )
    })?;

    validate_request(&request.xhtml, &request.source_lang, &request.target_lang)
        .map_err(api_error)?;

    tracing::info!(
        "收到翻译请求: {} 字节, {} -> {}",
        request.xhtml.len(),
        request.source_lang,
        request.target_lang
    );

    let output = run_translation(Arc::clone(&state.service), request)
        .await
        .map_err(|e| {
            tracing::warn!("翻译请求失败 [{}]: {}", e.category(), e);
            api_error(e)
        })?;

    Ok(Json(TranslateResponse {
        translated_xhtml: output.document,
        metadata: output.metadata,
    }))
}

/// DOM 句柄不是 `Send`，在阻塞线程上驱动整个翻译过程
///
/// 调用方断开时 axum 丢弃处理器 future，`cancel_tx` 随之释放，阻塞线程上的翻译被放弃。
async fn run_translation(
    service: Arc<TranslationService>,
    request: TranslateRequest,
) -> TranslationResult<TranslationOutput> {
    let handle = Handle::current();
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

    let result = task::spawn_blocking(move || {
        handle.block_on(service.translate_until(
            &request.xhtml,
            &request.source_lang,
            &request.target_lang,
            async {
                let _ = cancel_rx.await;
            },
        ))
    })
    .await
    .map_err(|e| helpers::internal_error(format!("翻译任务执行失败: {}", e)))?;

    drop(cancel_tx);
    result
}
