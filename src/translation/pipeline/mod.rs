//! 翻译管道模块
//!
//! 文本收集 → 并发分发与写回 → 结果汇总

pub mod aggregator;
pub mod collector;
pub mod dispatcher;

// 重新导出主要类型
pub use aggregator::{aggregate, AggregateSummary};
pub use collector::{collect_fragments, CollectionStats, CollectorConfig, Fragment, TextCollector};
pub use dispatcher::{DispatchStatsSnapshot, Dispatcher, FragmentOutcome};
