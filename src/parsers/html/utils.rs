/// 不可翻译容器：其直接文本子节点不会被翻译
pub const NON_TRANSLATABLE_TAGS: &[&str] = &["script", "style"];

/// 去除首尾空白后是否为空
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
