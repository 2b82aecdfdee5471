use std::collections::VecDeque;
use std::io;

use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::QualName;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::parsers::html::dom::content_children;
use crate::translation::error::{TranslationError, TranslationResult};

/// 序列化文档
///
/// 只输出文档节点的子节点，不额外添加 DOCTYPE。
/// `<template>` 的内容保存在独立的文档片段中，按元素子节点输出。
pub fn serialize_document(dom: &RcDom) -> TranslationResult<String> {
    let mut buf: Vec<u8> = Vec::new();

    serialize(&mut buf, &DocumentTree(dom.document.clone()), SerializeOpts::default())
        .map_err(|e| TranslationError::SerializationError(e.to_string()))?;

    String::from_utf8(buf).map_err(|e| TranslationError::SerializationError(e.to_string()))
}

struct DocumentTree(Handle);

enum SerializeOp {
    Open(Handle),
    Close(QualName),
}

impl Serialize for DocumentTree {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let mut ops: VecDeque<SerializeOp> = match traversal_scope {
            TraversalScope::IncludeNode => VecDeque::from([SerializeOp::Open(self.0.clone())]),
            TraversalScope::ChildrenOnly(_) => content_children(&self.0)
                .into_iter()
                .map(SerializeOp::Open)
                .collect(),
        };

        while let Some(op) = ops.pop_front() {
            match op {
                SerializeOp::Open(handle) => match handle.data {
                    NodeData::Element {
                        ref name,
                        ref attrs,
                        ..
                    } => {
                        serializer.start_elem(
                            name.clone(),
                            attrs.borrow().iter().map(|at| (&at.name, &at.value[..])),
                        )?;

                        ops.push_front(SerializeOp::Close(name.clone()));
                        for child in content_children(&handle).into_iter().rev() {
                            ops.push_front(SerializeOp::Open(child));
                        }
                    }
                    NodeData::Doctype { ref name, .. } => serializer.write_doctype(name)?,
                    NodeData::Text { ref contents } => serializer.write_text(&contents.borrow())?,
                    NodeData::Comment { ref contents } => serializer.write_comment(contents)?,
                    NodeData::ProcessingInstruction {
                        ref target,
                        ref contents,
                    } => serializer.write_processing_instruction(target, contents)?,
                    NodeData::Document => {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "文档节点不能嵌套在树中",
                        ))
                    }
                },
                SerializeOp::Close(name) => serializer.end_elem(name)?,
            }
        }

        Ok(())
    }
}
