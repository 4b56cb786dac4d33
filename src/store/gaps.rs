//! ID-gap tracker / 主键空洞记录
//!
//! Keeps primary keys freed by deletions so the next insertions can reuse
//! them. The tracker only changes after the store confirms an operation; on any
//! disagreement it keeps its current list and logs a warning.

use std::collections::VecDeque;

use crate::models::TermId;

#[derive(Debug, Default, Clone)]
pub struct GapTracker {
    gaps: VecDeque<TermId>,
    /// Value handed out by the last `next_insertion_id` / 最近一次分配的候选ID
    pending: Option<TermId>,
}

impl GapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from gaps found at startup, in the given order / 由启动时扫描结果构建
    pub fn from_gaps(gaps: impl IntoIterator<Item = TermId>) -> Self {
        let mut tracker = Self::new();
        tracker.release(gaps);
        tracker
    }

    /// Smallest pending gap, or `None` to let the store assign / 下一个插入ID
    pub fn next_insertion_id(&mut self) -> Option<TermId> {
        self.pending = self.gaps.front().copied();
        self.pending
    }

    /// Record the id the store actually assigned / 确认插入使用的ID
    pub fn confirm_consumed(&mut self, assigned: TermId) {
        match self.pending.take() {
            Some(requested) if requested == assigned => {
                if self.gaps.front() == Some(&requested) {
                    self.gaps.pop_front();
                }
            }
            Some(requested) => {
                tracing::warn!(
                    "Inserted at {}, expected to insert at {}; gap list left unchanged",
                    assigned,
                    requested
                );
            }
            None => {}
        }
    }

    /// Append ids freed by a delete / 追加删除释放的ID
    pub fn release(&mut self, ids: impl IntoIterator<Item = TermId>) {
        for id in ids {
            if !self.gaps.contains(&id) {
                self.gaps.push_back(id);
            }
        }
    }

    pub fn gaps(&self) -> &VecDeque<TermId> {
        &self.gaps
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.gaps.len()
    }
}
