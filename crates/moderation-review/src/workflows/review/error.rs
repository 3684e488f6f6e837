use super::answers::Question;
use super::status::FormVariant;

/// Validation failures raised while filling in a review.
///
/// Status resolution itself never fails; these only guard the form inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("'{0}' is not a valid answer (expected yes, no, or unanswered)")]
    InvalidAnswer(String),
    #[error("'{0}' is not a known review status")]
    UnknownStatus(String),
    #[error("'{0}' is not a known form variant (expected base or extended)")]
    UnknownVariant(String),
    #[error("'{0}' is not a known suspension reason")]
    UnknownSuspensionReason(String),
    #[error("the {variant} form does not ask about {question}")]
    QuestionNotInVariant {
        variant: FormVariant,
        question: Question,
    },
    #[error("invalid evidence: {0}")]
    InvalidEvidence(String),
}
