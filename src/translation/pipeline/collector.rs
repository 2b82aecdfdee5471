//! 文本收集器模块
//!
//! 深度优先（先序）遍历 DOM 树，收集可翻译的文本片段。
//! 文本节点需要同时满足两个条件才会被收集：
//!
//! - 去除首尾空白后非空
//! - 直接父元素不是不可翻译容器（默认 `script`、`style`）

use markup5ever_rcdom::{Handle, NodeData};

use crate::parsers::html::{content_children, get_node_name, is_blank};
use crate::translation::config::constants;

/// 一个可翻译文本片段，绑定到 DOM 中唯一的文本节点
#[derive(Debug, Clone)]
pub struct Fragment {
    /// 遍历顺序中的序号，从 0 开始
    pub id: usize,
    /// 收集时文本节点的原始内容（未去除空白）
    pub text: String,
    /// 直接父元素标签名
    pub parent_tag: Option<String>,
    /// 文本节点引用
    pub node: Handle,
}

impl Fragment {
    /// 获取文本字符数
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// 收集器配置
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 直接文本子节点不参与翻译的元素
    pub skip_tags: Vec<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            skip_tags: constants::SKIP_ELEMENTS
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
        }
    }
}

/// 收集统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub nodes_visited: usize,
    pub fragments_collected: usize,
    pub texts_skipped_blank: usize,
    pub texts_skipped_container: usize,
}

impl CollectionStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 文本收集器
#[derive(Debug, Default)]
pub struct TextCollector {
    config: CollectorConfig,
    stats: CollectionStats,
}

impl TextCollector {
    pub fn new(config: CollectorConfig) -> Self {
        Self {
            config,
            stats: CollectionStats::default(),
        }
    }

    /// 最近一次收集的统计
    pub fn stats(&self) -> &CollectionStats {
        &self.stats
    }

    /// 收集 `root` 子树中的所有可翻译片段
    ///
    /// 使用显式栈遍历，嵌套深度不受调用栈限制。不修改 DOM。
    pub fn collect_fragments(&mut self, root: &Handle) -> Vec<Fragment> {
        self.stats.reset();

        let mut fragments = Vec::new();
        // (节点, 直接父元素标签)
        let mut stack: Vec<(Handle, Option<String>)> = vec![(root.clone(), None)];

        while let Some((node, parent_tag)) = stack.pop() {
            self.stats.nodes_visited += 1;

            if let NodeData::Text { ref contents } = node.data {
                let text = contents.borrow().to_string();

                if is_blank(&text) {
                    self.stats.texts_skipped_blank += 1;
                } else if self.is_skipped_container(parent_tag.as_deref()) {
                    self.stats.texts_skipped_container += 1;
                } else {
                    fragments.push(Fragment {
                        id: fragments.len(),
                        text,
                        parent_tag: parent_tag.clone(),
                        node: node.clone(),
                    });
                }
            }

            let tag = get_node_name(&node).map(str::to_string);
            // 逆序入栈，保证先序遍历顺序；模板元素的内容片段也按子节点处理
            for child in content_children(&node).into_iter().rev() {
                stack.push((child, tag.clone()));
            }
        }

        self.stats.fragments_collected = fragments.len();

        tracing::debug!(
            "文本收集完成: 访问 {} 个节点, 收集 {} 个片段, 跳过空白 {} 个, 跳过容器内 {} 个",
            self.stats.nodes_visited,
            self.stats.fragments_collected,
            self.stats.texts_skipped_blank,
            self.stats.texts_skipped_container
        );

        fragments
    }

    fn is_skipped_container(&self, parent_tag: Option<&str>) -> bool {
        match parent_tag {
            Some(tag) => self
                .config
                .skip_tags
                .iter()
                .any(|skip| skip.eq_ignore_ascii_case(tag)),
            None => false,
        }
    }
}

/// 便利函数：使用默认配置收集片段
pub fn collect_fragments(root: &Handle) -> Vec<Fragment> {
    TextCollector::default().collect_fragments(root)
}
