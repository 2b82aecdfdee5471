use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::translation::error::{TranslationError, TranslationResult};

/// 将 HTML 文本解析为 DOM
///
/// html5ever 会补全缺失的 `html`、`head`、`body` 元素，因此片段输入也会得到完整文档。
pub fn html_to_dom(data: &str) -> TranslationResult<RcDom> {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut data.as_bytes())
        .map_err(|e| TranslationError::ParseError(e.to_string()))
}

/// 获取节点的内容子节点
///
/// `<template>` 的子节点保存在独立的文档片段中，此时返回片段的子节点。
pub fn content_children(node: &Handle) -> Vec<Handle> {
    if let NodeData::Element {
        ref template_contents,
        ..
    } = node.data
    {
        if let Some(ref contents) = *template_contents.borrow() {
            return contents.children.borrow().clone();
        }
    }
    node.children.borrow().clone()
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}
