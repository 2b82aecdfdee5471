//! Web 服务器模块
//!
//! 通过 HTTP 暴露文档翻译服务：
//!
//! - `POST /translate` - 翻译 XHTML 文档
//! - `GET /health` - 服务状态

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::translation::{error::helpers, TranslationResult, TranslationService};

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    service: Arc<TranslationService>,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, service: Arc<TranslationService>) -> Self {
        Self { config, service }
    }

    /// 启动 Web 服务器，直到监听失败才返回
    pub async fn start(&self) -> TranslationResult<()> {
        self.config
            .validate()
            .map_err(helpers::config_error)?;

        let app_state = Arc::new(AppState {
            service: Arc::clone(&self.service),
        });
        let app = create_router(app_state);

        let address = self.config.listen_address();
        let listener = tokio::net::TcpListener::bind(&address)
            .await
            .map_err(|e| helpers::network_error(format!("绑定服务器地址 {} 失败: {}", address, e)))?;

        tracing::info!(
            "翻译服务启动于 http://{} (模型: {})",
            address,
            self.service.model_name()
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| helpers::internal_error(format!("服务器错误: {}", e)))?;

        Ok(())
    }
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>) -> Router {
    create_routes()
        .with_state(app_state)
        .layer(CorsLayer::permissive())
}
