use super::answers::{AnswerSet, Question};
use super::status::{FormVariant, ReviewStatus};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Signals that can trigger platform outreach when paired with a platform entity.
const RISK_SIGNALS: [Question; 2] = [Question::HighRiskSignal, Question::MediumRiskSignal];

/// Resolver parameters. The two form variants differ only in the catch-all set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub catch_all_signals: Vec<Question>,
}

impl ResolverConfig {
    pub fn for_variant(variant: FormVariant) -> Self {
        Self {
            catch_all_signals: variant.catch_all_signals().to_vec(),
        }
    }
}

/// Rule that produced a resolution, kept for audit output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ResolutionRule {
    SecondOpinionRequested,
    PlatformRiskOutreach { signal: Question },
    PositiveSignal { signal: Question },
    NoSignal,
}

impl ResolutionRule {
    pub const fn status(self) -> ReviewStatus {
        match self {
            Self::SecondOpinionRequested => ReviewStatus::NeedsSecondOpinion,
            Self::PlatformRiskOutreach { .. } => ReviewStatus::Outreach,
            Self::PositiveSignal { .. } => ReviewStatus::ReadyToAction,
            Self::NoSignal => ReviewStatus::Open,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Self::SecondOpinionRequested => "reviewer requested a second opinion".to_string(),
            Self::PlatformRiskOutreach { signal } => {
                format!("platform/enterprise entity with a confirmed {signal}")
            }
            Self::PositiveSignal { signal } => format!("confirmed {signal}"),
            Self::NoSignal => "no signal confirmed".to_string(),
        }
    }
}

/// Status paired with the rule that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub status: ReviewStatus,
    pub rule: ResolutionRule,
}

impl Resolution {
    pub fn rationale(&self) -> String {
        format!("{}: {}", self.status.label(), self.rule.summary())
    }
}

/// Stateless resolver mapping reviewer answers onto a workflow status.
#[derive(Debug, Clone)]
pub struct StatusResolver {
    config: ResolverConfig,
}

impl StatusResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn for_variant(variant: FormVariant) -> Self {
        Self::new(ResolverConfig::for_variant(variant))
    }

    pub fn resolve(&self, answers: &AnswerSet) -> ReviewStatus {
        self.explain(answers).status
    }

    /// Applies the rules in order; the first match wins.
    pub fn explain(&self, answers: &AnswerSet) -> Resolution {
        let rule = self.match_rule(answers);
        let resolution = Resolution {
            status: rule.status(),
            rule,
        };
        debug!(rule = ?resolution.rule, status = %resolution.status, "resolved review status");
        resolution
    }

    fn match_rule(&self, answers: &AnswerSet) -> ResolutionRule {
        if answers.is_yes(Question::SecondOpinion) {
            return ResolutionRule::SecondOpinionRequested;
        }

        let confirmed_risk = RISK_SIGNALS
            .into_iter()
            .find(|signal| answers.is_yes(*signal));

        if answers.is_yes(Question::PlatformOrEnterprise) {
            if let Some(signal) = confirmed_risk {
                return ResolutionRule::PlatformRiskOutreach { signal };
            }
        }

        if let Some(signal) = self
            .config
            .catch_all_signals
            .iter()
            .copied()
            .find(|signal| answers.is_yes(*signal))
        {
            return ResolutionRule::PositiveSignal { signal };
        }

        ResolutionRule::NoSignal
    }
}

/// Resolve with the base form's rule set.
pub fn resolve(answers: &AnswerSet) -> ReviewStatus {
    StatusResolver::for_variant(FormVariant::Base).resolve(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::review::answers::Answer;

    fn answers(pairs: &[(Question, Answer)]) -> AnswerSet {
        pairs
            .iter()
            .fold(AnswerSet::new(), |set, (question, answer)| {
                set.with(*question, *answer)
            })
    }

    #[test]
    fn unanswered_form_stays_open() {
        let resolution = StatusResolver::for_variant(FormVariant::Base).explain(&AnswerSet::new());
        assert_eq!(resolution.status, ReviewStatus::Open);
        assert_eq!(resolution.rule, ResolutionRule::NoSignal);
    }

    #[test]
    fn second_opinion_dominates_platform_risk() {
        let set = answers(&[
            (Question::SecondOpinion, Answer::Yes),
            (Question::PlatformOrEnterprise, Answer::Yes),
            (Question::HighRiskSignal, Answer::Yes),
        ]);

        assert_eq!(resolve(&set), ReviewStatus::NeedsSecondOpinion);
    }

    #[test]
    fn platform_with_risk_goes_to_outreach_not_ready_to_action() {
        let set = answers(&[
            (Question::SecondOpinion, Answer::No),
            (Question::PlatformOrEnterprise, Answer::Yes),
            (Question::MediumRiskSignal, Answer::Yes),
        ]);

        let resolution = StatusResolver::for_variant(FormVariant::Base).explain(&set);
        assert_eq!(resolution.status, ReviewStatus::Outreach);
        assert_eq!(
            resolution.rule,
            ResolutionRule::PlatformRiskOutreach {
                signal: Question::MediumRiskSignal
            }
        );
    }

    #[test]
    fn platform_without_risk_is_not_a_signal() {
        let set = answers(&[(Question::PlatformOrEnterprise, Answer::Yes)]);
        assert_eq!(resolve(&set), ReviewStatus::Open);
    }

    #[test]
    fn extended_signals_only_count_on_the_extended_form() {
        let set = answers(&[(Question::GoodSignal, Answer::Yes)]);

        assert_eq!(resolve(&set), ReviewStatus::Open);
        assert_eq!(
            StatusResolver::for_variant(FormVariant::Extended).resolve(&set),
            ReviewStatus::ReadyToAction
        );
    }

    #[test]
    fn visual_directory_on_platform_is_not_outreach() {
        let set = answers(&[
            (Question::PlatformOrEnterprise, Answer::Yes),
            (Question::VisualDirectory, Answer::Yes),
        ]);

        let resolution = StatusResolver::for_variant(FormVariant::Extended).explain(&set);
        assert_eq!(resolution.status, ReviewStatus::ReadyToAction);
        assert_eq!(
            resolution.rule,
            ResolutionRule::PositiveSignal {
                signal: Question::VisualDirectory
            }
        );
    }

    #[test]
    fn custom_catch_all_set_is_honored() {
        let resolver = StatusResolver::new(ResolverConfig {
            catch_all_signals: vec![Question::GoodSignal],
        });
        let set = answers(&[(Question::HighRiskSignal, Answer::Yes)]);

        assert_eq!(resolver.resolve(&set), ReviewStatus::Open);
    }

    #[test]
    fn rationale_names_status_and_signal() {
        let set = answers(&[(Question::HighRiskSignal, Answer::Yes)]);
        let rationale = StatusResolver::for_variant(FormVariant::Base)
            .explain(&set)
            .rationale();

        assert!(rationale.starts_with("Ready to Action"));
        assert!(rationale.contains("high risk signal"));
    }
}
