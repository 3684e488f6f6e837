use super::status::{ReviewStatus, StatusPipeline};
use serde::Serialize;

/// Position of a status along a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub index: usize,
    pub fraction: f32,
}

/// Locate `status` in `pipeline` and derive the completion fraction.
///
/// A status missing from the pipeline is pinned to the first step. Pipelines
/// with fewer than two steps report `1.0` when the status is present and
/// `0.0` otherwise.
pub fn project(status: ReviewStatus, pipeline: &StatusPipeline) -> Progress {
    let position = pipeline.position(status);
    let index = position.unwrap_or(0);

    let fraction = if pipeline.len() <= 1 {
        if position.is_some() {
            1.0
        } else {
            0.0
        }
    } else {
        index as f32 / (pipeline.len() - 1) as f32
    };

    Progress { index, fraction }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressStep {
    pub status: ReviewStatus,
    pub label: &'static str,
    pub reached: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    pub status: ReviewStatus,
    pub status_label: &'static str,
    pub index: usize,
    pub total_steps: usize,
    pub fraction: f32,
    pub percent: u8,
    pub steps: Vec<ProgressStep>,
}

impl ProgressView {
    pub fn build(status: ReviewStatus, pipeline: &StatusPipeline) -> Self {
        let progress = project(status, pipeline);
        let steps = pipeline
            .steps()
            .iter()
            .enumerate()
            .map(|(idx, step)| ProgressStep {
                status: *step,
                label: step.label(),
                reached: idx <= progress.index,
                active: idx == progress.index,
            })
            .collect();

        Self {
            status,
            status_label: status.label(),
            index: progress.index,
            total_steps: pipeline.len(),
            fraction: progress.fraction,
            percent: (progress.fraction * 100.0).round() as u8,
            steps,
        }
    }

    /// Single-line rendering such as `[###----] Outreach (33%)`.
    pub fn bar(&self) -> String {
        let marks: String = self
            .steps
            .iter()
            .map(|step| if step.reached { '#' } else { '-' })
            .collect();
        format!("[{marks}] {} ({}%)", self.status_label, self.percent)
    }
}
