//! # 解析器模块
//!
//! 这个模块包含 (X)HTML 文档与 DOM 树之间的转换功能：
//!
//! - HTML 解析为可变的 DOM 树
//! - DOM 树序列化回文本
//!
//! # 模块组织
//!
//! - `html` - HTML文档解析、DOM查询、序列化

pub mod html;

// Re-export commonly used items for convenience
pub use html::{get_node_name, html_to_dom, serialize_document};
