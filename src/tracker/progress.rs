//! Stage-by-stage rendering of an order's status.

use crate::model::{OrderStatus, OrderTrackingInfo, STAGE_SEQUENCE};
use std::fmt::Write;

/// One row of the progress list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageView {
    pub stage: OrderStatus,
    /// The order has reached or passed this stage.
    pub complete: bool,
    pub current: bool,
    /// Only ever set on the current stage.
    pub estimated_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub stages: Vec<StageView>,
    pub cancelled: bool,
}

impl ProgressView {
    /// A stage is complete iff its index is at most the index of the current status.
    ///
    /// `Pending` has no index, so nothing is complete. `Cancelled` is shown as its own
    /// terminal state: nothing complete, nothing current, `cancelled` set.
    pub fn render(info: &OrderTrackingInfo) -> Self {
        let current = info.status.stage_index();
        let stages = STAGE_SEQUENCE
            .iter()
            .enumerate()
            .map(|(index, &stage)| {
                let is_current = current == Some(index);
                StageView {
                    stage,
                    complete: current.is_some_and(|c| index <= c),
                    current: is_current,
                    estimated_minutes: if is_current { info.estimated_minutes } else { None },
                }
            })
            .collect();

        Self {
            stages,
            cancelled: info.status == OrderStatus::Cancelled,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.stages.iter().filter(|s| s.complete).count()
    }

    pub fn current(&self) -> Option<&StageView> {
        self.stages.iter().find(|s| s.current)
    }

    /// Plain-text progress list, one line per stage.
    ///
    /// ```text
    /// [✓] Confirmed
    /// [✓] Preparing  (est. 5 mins)
    /// [3] Ready
    /// [4] Completed
    /// ```
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if self.cancelled {
            out.push_str("Order cancelled\n");
        }
        for (index, stage) in self.stages.iter().enumerate() {
            let marker = if stage.complete {
                "✓".to_string()
            } else {
                (index + 1).to_string()
            };
            let _ = write!(out, "[{marker}] {}", capitalize(stage.stage.label()));
            if let Some(minutes) = stage.estimated_minutes {
                let _ = write!(out, "  (est. {minutes} mins)");
            }
            out.push('\n');
        }
        out
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
