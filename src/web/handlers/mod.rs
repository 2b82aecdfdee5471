//! Web 路由处理器

pub mod health;
pub mod translate;

pub use health::health_check;
pub use translate::translate_document;
