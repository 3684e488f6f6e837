use super::error::ReviewError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reviewer response to a single yes/no question.
///
/// `No` and `Unanswered` are kept apart so the form can show what was
/// actually selected, but the resolver only ever branches on `Yes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    #[default]
    Unanswered,
}

impl Answer {
    pub const fn all() -> [Self; 3] {
        [Self::Yes, Self::No, Self::Unanswered]
    }

    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Unanswered => "Unanswered",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Answer {
    type Err = ReviewError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(Self::Yes),
            "no" | "n" | "false" => Ok(Self::No),
            "" | "unanswered" | "unset" | "skip" => Ok(Self::Unanswered),
            _ => Err(ReviewError::InvalidAnswer(raw.to_string())),
        }
    }
}

/// The questions a reviewer can be asked, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    PlatformOrEnterprise,
    VisualDirectory,
    HighRiskSignal,
    MediumRiskSignal,
    GoodSignal,
    SecondOpinion,
}

impl Question {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::PlatformOrEnterprise,
            Self::VisualDirectory,
            Self::HighRiskSignal,
            Self::MediumRiskSignal,
            Self::GoodSignal,
            Self::SecondOpinion,
        ]
    }

    /// Field name used in JSON payloads.
    pub const fn key(self) -> &'static str {
        match self {
            Self::PlatformOrEnterprise => "is_platform_or_enterprise",
            Self::VisualDirectory => "is_visual_directory",
            Self::HighRiskSignal => "has_high_risk_signal",
            Self::MediumRiskSignal => "has_medium_risk_signal",
            Self::GoodSignal => "has_good_signal",
            Self::SecondOpinion => "needs_second_opinion",
        }
    }

    pub const fn prompt(self) -> &'static str {
        match self {
            Self::PlatformOrEnterprise => "Is this a Platform/Enterprise?",
            Self::VisualDirectory => "Is this a Visual Directory?",
            Self::HighRiskSignal => {
                "Have you found at least 1 High Risk Signal? Or Confirm at least 1 High Risk Signal from AI Opinion?"
            }
            Self::MediumRiskSignal => {
                "Have you found at least 3 Medium Risk Signal? Or Confirm at least 3 Medium Risk Signal from AI Opinion?"
            }
            Self::GoodSignal => "Have you found at least 1 Good Signal?",
            Self::SecondOpinion => "Is a Second Opinion Needed?",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PlatformOrEnterprise => "platform/enterprise",
            Self::VisualDirectory => "visual directory",
            Self::HighRiskSignal => "high risk signal",
            Self::MediumRiskSignal => "medium risk signal",
            Self::GoodSignal => "good signal",
            Self::SecondOpinion => "second opinion",
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Answers collected from the reviewer for one flagged entity.
///
/// Every field starts `Unanswered` and fields are independent of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerSet {
    #[serde(default, deserialize_with = "deserialize_answer")]
    pub is_platform_or_enterprise: Answer,
    #[serde(default, deserialize_with = "deserialize_answer")]
    pub is_visual_directory: Answer,
    #[serde(default, deserialize_with = "deserialize_answer")]
    pub has_high_risk_signal: Answer,
    #[serde(default, deserialize_with = "deserialize_answer")]
    pub has_medium_risk_signal: Answer,
    #[serde(default, deserialize_with = "deserialize_answer")]
    pub has_good_signal: Answer,
    #[serde(default, deserialize_with = "deserialize_answer")]
    pub needs_second_opinion: Answer,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn get(&self, question: Question) -> Answer {
        match question {
            Question::PlatformOrEnterprise => self.is_platform_or_enterprise,
            Question::VisualDirectory => self.is_visual_directory,
            Question::HighRiskSignal => self.has_high_risk_signal,
            Question::MediumRiskSignal => self.has_medium_risk_signal,
            Question::GoodSignal => self.has_good_signal,
            Question::SecondOpinion => self.needs_second_opinion,
        }
    }

    pub fn set(&mut self, question: Question, answer: Answer) {
        let slot = match question {
            Question::PlatformOrEnterprise => &mut self.is_platform_or_enterprise,
            Question::VisualDirectory => &mut self.is_visual_directory,
            Question::HighRiskSignal => &mut self.has_high_risk_signal,
            Question::MediumRiskSignal => &mut self.has_medium_risk_signal,
            Question::GoodSignal => &mut self.has_good_signal,
            Question::SecondOpinion => &mut self.needs_second_opinion,
        };
        *slot = answer;
    }

    /// Builder-style variant of [`AnswerSet::set`].
    pub fn with(mut self, question: Question, answer: Answer) -> Self {
        self.set(question, answer);
        self
    }

    pub fn is_yes(&self, question: Question) -> bool {
        self.get(question).is_yes()
    }

    /// Questions that carry an explicit `Yes` or `No`.
    pub fn answered(&self) -> impl Iterator<Item = (Question, Answer)> + '_ {
        Question::ordered()
            .into_iter()
            .map(|question| (question, self.get(question)))
            .filter(|(_, answer)| *answer != Answer::Unanswered)
    }
}

fn deserialize_answer<'de, D>(deserializer: D) -> Result<Answer, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Answer>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
