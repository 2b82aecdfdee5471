//! 结果汇总
//!
//! 全部成功才算成功。存在多个失败时报告片段顺序中的第一个失败，其余失败只计数并记录日志。

use crate::translation::error::{TranslationError, TranslationResult};

use super::dispatcher::FragmentOutcome;

/// 汇总结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateSummary {
    /// 成功翻译的片段数
    pub translated: usize,
}

/// 汇总所有片段的翻译结果
///
/// `outcomes` 需按片段顺序排列（`Dispatcher::dispatch` 的返回值即满足）。
pub fn aggregate(outcomes: Vec<FragmentOutcome>) -> TranslationResult<AggregateSummary> {
    let total = outcomes.len();
    let mut first_failure: Option<(usize, TranslationError)> = None;
    let mut failed = 0usize;

    for outcome in outcomes {
        if let Err(e) = outcome.result {
            failed += 1;
            if first_failure.is_none() {
                first_failure = Some((outcome.id, e));
            }
        }
    }

    match first_failure {
        Some((id, error)) => {
            tracing::warn!(
                "{}/{} 个片段翻译失败，报告第一个失败（片段 {}）: {}",
                failed,
                total,
                id,
                error
            );
            Err(error)
        }
        None => Ok(AggregateSummary { translated: total }),
    }
}
