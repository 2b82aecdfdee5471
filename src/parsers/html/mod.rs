//! HTML解析和处理模块
//!
//! - `utils`: 基础工具函数和常量
//! - `dom`: 解析和基础DOM操作
//! - `serializer`: 序列化功能

pub mod dom;
pub mod serializer;
pub mod utils;

pub use dom::{content_children, get_node_name, html_to_dom};
pub use serializer::serialize_document;
pub use utils::{is_blank, NON_TRANSLATABLE_TAGS};
