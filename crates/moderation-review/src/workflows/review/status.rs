use super::answers::Question;
use super::error::ReviewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow status of a review.
///
/// `Done` and `Complete` are the terminal values of the base and extended
/// pipelines respectively; each pipeline only ever contains one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Open,
    InProgress,
    Outreach,
    NeedsSecondOpinion,
    AwaitingReply,
    ReadyToAction,
    Done,
    Complete,
}

impl ReviewStatus {
    pub const fn all() -> [Self; 8] {
        [
            Self::Open,
            Self::InProgress,
            Self::Outreach,
            Self::NeedsSecondOpinion,
            Self::AwaitingReply,
            Self::ReadyToAction,
            Self::Done,
            Self::Complete,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Outreach => "Outreach",
            Self::NeedsSecondOpinion => "Needs Second Opinion",
            Self::AwaitingReply => "Awaiting Reply",
            Self::ReadyToAction => "Ready to Action",
            Self::Done => "Done",
            Self::Complete => "Complete",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReviewStatus {
    type Err = ReviewError;

    /// Accepts either the display label or the snake_case key.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim();
        Self::all()
            .into_iter()
            .find(|status| {
                status.label().eq_ignore_ascii_case(needle)
                    || status
                        .label()
                        .replace(' ', "_")
                        .eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| ReviewError::UnknownStatus(raw.to_string()))
    }
}

/// Ordered status vocabulary used for progress display.
///
/// Order has no bearing on which transitions are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusPipeline {
    steps: Vec<ReviewStatus>,
}

impl StatusPipeline {
    pub fn new(steps: Vec<ReviewStatus>) -> Self {
        Self { steps }
    }

    pub fn base() -> Self {
        Self::new(vec![
            ReviewStatus::Open,
            ReviewStatus::InProgress,
            ReviewStatus::Outreach,
            ReviewStatus::NeedsSecondOpinion,
            ReviewStatus::AwaitingReply,
            ReviewStatus::ReadyToAction,
            ReviewStatus::Done,
        ])
    }

    pub fn extended() -> Self {
        Self::new(vec![
            ReviewStatus::Open,
            ReviewStatus::InProgress,
            ReviewStatus::Outreach,
            ReviewStatus::NeedsSecondOpinion,
            ReviewStatus::AwaitingReply,
            ReviewStatus::ReadyToAction,
            ReviewStatus::Complete,
        ])
    }

    pub fn steps(&self) -> &[ReviewStatus] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn position(&self, status: ReviewStatus) -> Option<usize> {
        self.steps.iter().position(|step| *step == status)
    }

    pub fn last(&self) -> Option<ReviewStatus> {
        self.steps.last().copied()
    }
}

/// The two review forms in use. They share one resolver and differ only in
/// which questions they ask and how their pipeline terminates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    #[default]
    Base,
    Extended,
}

impl FormVariant {
    pub const fn ordered() -> [Self; 2] {
        [Self::Base, Self::Extended]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Extended => "extended",
        }
    }

    pub fn pipeline(self) -> StatusPipeline {
        match self {
            Self::Base => StatusPipeline::base(),
            Self::Extended => StatusPipeline::extended(),
        }
    }

    pub const fn terminal_status(self) -> ReviewStatus {
        match self {
            Self::Base => ReviewStatus::Done,
            Self::Extended => ReviewStatus::Complete,
        }
    }

    /// Questions shown on the form, in the order they are asked.
    pub const fn questions(self) -> &'static [Question] {
        match self {
            Self::Base => &[
                Question::PlatformOrEnterprise,
                Question::HighRiskSignal,
                Question::MediumRiskSignal,
                Question::SecondOpinion,
            ],
            Self::Extended => &[
                Question::PlatformOrEnterprise,
                Question::VisualDirectory,
                Question::HighRiskSignal,
                Question::MediumRiskSignal,
                Question::GoodSignal,
                Question::SecondOpinion,
            ],
        }
    }

    pub fn asks(self, question: Question) -> bool {
        self.questions().contains(&question)
    }

    /// Signals that move a review to `Ready to Action` on their own.
    pub const fn catch_all_signals(self) -> &'static [Question] {
        match self {
            Self::Base => &[Question::HighRiskSignal, Question::MediumRiskSignal],
            Self::Extended => &[
                Question::HighRiskSignal,
                Question::MediumRiskSignal,
                Question::VisualDirectory,
                Question::GoodSignal,
            ],
        }
    }
}

impl fmt::Display for FormVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormVariant {
    type Err = ReviewError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "base" | "standard" => Ok(Self::Base),
            "extended" => Ok(Self::Extended),
            _ => Err(ReviewError::UnknownVariant(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipelines_differ_only_in_terminal_status() {
        let base = StatusPipeline::base();
        let extended = StatusPipeline::extended();

        assert_eq!(base.len(), 7);
        assert_eq!(extended.len(), 7);
        assert_eq!(base.steps()[..6], extended.steps()[..6]);
        assert_eq!(base.last(), Some(ReviewStatus::Done));
        assert_eq!(extended.last(), Some(ReviewStatus::Complete));
        assert_eq!(base.position(ReviewStatus::Complete), None);
    }

    #[test]
    fn status_parses_labels_and_keys() {
        assert_eq!(
            "Needs Second Opinion"
                .parse::<ReviewStatus>()
                .expect("label parses"),
            ReviewStatus::NeedsSecondOpinion
        );
        assert_eq!(
            "ready_to_action"
                .parse::<ReviewStatus>()
                .expect("key parses"),
            ReviewStatus::ReadyToAction
        );
        assert!(matches!(
            "Escalated".parse::<ReviewStatus>(),
            Err(ReviewError::UnknownStatus(_))
        ));
    }

    #[test]
    fn extended_form_asks_every_question() {
        assert!(Question::ordered()
            .into_iter()
            .all(|question| FormVariant::Extended.asks(question)));
        assert!(!FormVariant::Base.asks(Question::VisualDirectory));
        assert!(!FormVariant::Base.asks(Question::GoodSignal));
    }

    #[test]
    fn variant_parsing_rejects_unknown_names() {
        assert_eq!(
            "Extended".parse::<FormVariant>().expect("variant parses"),
            FormVariant::Extended
        );
        assert!(matches!(
            "premium".parse::<FormVariant>(),
            Err(ReviewError::UnknownVariant(_))
        ));
    }
}
