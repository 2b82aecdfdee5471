//! 翻译系统核心模块
//!
//! 提供对外的翻译服务入口。服务按顺序驱动解析、收集、分发、汇总和序列化，
//! 并在整个过程外面套一层超时。
//!
//! ## 模块依赖关系
//!
//! ```text
//! TranslationService (service.rs)
//!     ├── html_to_dom / serialize_document (parsers/html)
//!     ├── TextCollector (pipeline/collector.rs)
//!     ├── Dispatcher (pipeline/dispatcher.rs)
//!     │       └── TextTranslator (llm/mod.rs)
//!     └── aggregate (pipeline/aggregator.rs)
//! ```

pub mod service;

/// 统一翻译服务 - 主要的对外接口
pub use service::TranslationService;

/// 翻译结果与元数据
pub use service::{Metadata, TranslationOutput};

/// 服务运行统计信息
pub use service::{ServiceStats, ServiceStatsSnapshot};

pub use service::validate_request;
