//! 健康检查处理器

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::web::types::{AppState, HealthResponse};

/// 报告服务状态、配置的模型和运行统计
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let service = &state.service;

    Json(HealthResponse {
        status: "ok",
        model: service.model_name().to_string(),
        max_concurrent_requests: service.config().max_concurrent_requests,
        stats: service.get_stats().snapshot(),
    })
}
