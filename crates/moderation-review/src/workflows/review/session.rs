use super::answers::{Answer, AnswerSet, Question};
use super::error::ReviewError;
use super::progress::ProgressView;
use super::resolver::{Resolution, ResolutionRule, StatusResolver};
use super::status::{FormVariant, ReviewStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Identifier of the flagged site or account under review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspensionReason {
    Phishing,
    Fraud,
    Malware,
    Spam,
}

impl SuspensionReason {
    pub const fn ordered() -> [Self; 4] {
        [Self::Phishing, Self::Fraud, Self::Malware, Self::Spam]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Phishing => "Phishing",
            Self::Fraud => "Fraud",
            Self::Malware => "Malware",
            Self::Spam => "Spam",
        }
    }
}

impl FromStr for SuspensionReason {
    type Err = ReviewError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|reason| reason.label().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| ReviewError::UnknownSuspensionReason(raw.to_string()))
    }
}

/// Free-text fields that accompany the yes/no questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    HighRiskSignals,
    MediumRiskSignals,
    SecondOpinionReason,
    General,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewNotes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_risk_signals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_risk_signals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_opinion_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general: Option<String>,
}

impl ReviewNotes {
    pub fn get(&self, kind: NoteKind) -> Option<&str> {
        match kind {
            NoteKind::HighRiskSignals => self.high_risk_signals.as_deref(),
            NoteKind::MediumRiskSignals => self.medium_risk_signals.as_deref(),
            NoteKind::SecondOpinionReason => self.second_opinion_reason.as_deref(),
            NoteKind::General => self.general.as_deref(),
        }
    }

    fn slot_mut(&mut self, kind: NoteKind) -> &mut Option<String> {
        match kind {
            NoteKind::HighRiskSignals => &mut self.high_risk_signals,
            NoteKind::MediumRiskSignals => &mut self.medium_risk_signals,
            NoteKind::SecondOpinionReason => &mut self.second_opinion_reason,
            NoteKind::General => &mut self.general,
        }
    }
}

/// Metadata for an evidence file. File contents are never read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceDescriptor {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// One reviewer's pass over a flagged entity.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    entity: EntityId,
    variant: FormVariant,
    answers: AnswerSet,
    status: ReviewStatus,
    notes: ReviewNotes,
    suspension_reason: Option<SuspensionReason>,
    do_not_reinstate: bool,
    evidence: Vec<EvidenceDescriptor>,
    resolver: StatusResolver,
}

impl ReviewSession {
    pub fn new(entity: EntityId, variant: FormVariant) -> Self {
        Self {
            entity,
            variant,
            answers: AnswerSet::new(),
            status: ReviewStatus::Open,
            notes: ReviewNotes::default(),
            suspension_reason: None,
            do_not_reinstate: false,
            evidence: Vec::new(),
            resolver: StatusResolver::for_variant(variant),
        }
    }

    pub fn entity(&self) -> &EntityId {
        &self.entity
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Status as of the last submission; answering alone does not change it.
    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    pub fn notes(&self) -> &ReviewNotes {
        &self.notes
    }

    pub fn suspension_reason(&self) -> Option<SuspensionReason> {
        self.suspension_reason
    }

    pub fn do_not_reinstate(&self) -> bool {
        self.do_not_reinstate
    }

    pub fn evidence(&self) -> &[EvidenceDescriptor] {
        &self.evidence
    }

    pub fn answer(&mut self, question: Question, answer: Answer) -> Result<(), ReviewError> {
        if !self.variant.asks(question) {
            return Err(ReviewError::QuestionNotInVariant {
                variant: self.variant,
                question,
            });
        }
        self.answers.set(question, answer);
        Ok(())
    }

    /// Blank text clears the note.
    pub fn attach_note(&mut self, kind: NoteKind, text: impl Into<String>) {
        let text = text.into();
        let trimmed = text.trim();
        *self.notes.slot_mut(kind) = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn set_suspension_reason(&mut self, reason: Option<SuspensionReason>) {
        self.suspension_reason = reason;
    }

    pub fn set_do_not_reinstate(&mut self, flag: bool) {
        self.do_not_reinstate = flag;
    }

    pub fn attach_evidence(&mut self, evidence: EvidenceDescriptor) -> Result<(), ReviewError> {
        let file_name = evidence.file_name.trim();
        if file_name.is_empty() {
            return Err(ReviewError::InvalidEvidence(
                "file name must not be blank".to_string(),
            ));
        }
        if file_name.contains(['/', '\\']) {
            return Err(ReviewError::InvalidEvidence(format!(
                "file name '{file_name}' must not contain a path"
            )));
        }

        self.evidence.push(EvidenceDescriptor {
            file_name: file_name.to_string(),
            ..evidence
        });
        Ok(())
    }

    pub fn progress(&self) -> ProgressView {
        ProgressView::build(self.status, &self.variant.pipeline())
    }

    /// Recompute the status from the current answers and hand off the result.
    pub fn submit(&mut self, submitted_at: DateTime<Utc>) -> ReviewOutcome {
        let resolution = self.resolver.explain(&self.answers);
        let previous = self.status;
        self.status = resolution.status;

        info!(
            entity = %self.entity,
            variant = %self.variant,
            from = %previous,
            to = %self.status,
            "review submitted"
        );

        ReviewOutcome {
            entity: self.entity.clone(),
            variant: self.variant,
            status: resolution.status,
            status_label: resolution.status.label(),
            rule: resolution.rule,
            rationale: resolution.rationale(),
            progress: self.progress(),
            answers: self.answers,
            notes: self.notes.clone(),
            suspension_reason: self.suspension_reason,
            do_not_reinstate: self.do_not_reinstate,
            evidence: self.evidence.clone(),
            submitted_at,
        }
    }
}

/// Snapshot produced by [`ReviewSession::submit`].
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    pub entity: EntityId,
    pub variant: FormVariant,
    pub status: ReviewStatus,
    pub status_label: &'static str,
    pub rule: ResolutionRule,
    pub rationale: String,
    pub progress: ProgressView,
    pub answers: AnswerSet,
    pub notes: ReviewNotes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspension_reason: Option<SuspensionReason>,
    pub do_not_reinstate: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<EvidenceDescriptor>,
    pub submitted_at: DateTime<Utc>,
}

impl ReviewOutcome {
    pub fn resolution(&self) -> Resolution {
        Resolution {
            status: self.status,
            rule: self.rule,
        }
    }
}

/// JSON shape of a filled-in review form.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewForm {
    pub entity_id: String,
    #[serde(default)]
    pub variant: Option<FormVariant>,
    #[serde(default)]
    pub answers: AnswerSet,
    #[serde(default)]
    pub notes: ReviewNotes,
    #[serde(default)]
    pub suspension_reason: Option<SuspensionReason>,
    #[serde(default)]
    pub do_not_reinstate: bool,
    #[serde(default)]
    pub evidence: Vec<EvidenceDescriptor>,
}

impl ReviewForm {
    /// Replay the form through a fresh session so the usual validation applies.
    pub fn into_session(self, default_variant: FormVariant) -> Result<ReviewSession, ReviewError> {
        let variant = self.variant.unwrap_or(default_variant);
        let mut session = ReviewSession::new(EntityId(self.entity_id), variant);

        for (question, answer) in self.answers.answered() {
            session.answer(question, answer)?;
        }

        let ReviewNotes {
            high_risk_signals,
            medium_risk_signals,
            second_opinion_reason,
            general,
        } = self.notes;
        for (kind, text) in [
            (NoteKind::HighRiskSignals, high_risk_signals),
            (NoteKind::MediumRiskSignals, medium_risk_signals),
            (NoteKind::SecondOpinionReason, second_opinion_reason),
            (NoteKind::General, general),
        ] {
            if let Some(text) = text {
                session.attach_note(kind, text);
            }
        }

        session.set_suspension_reason(self.suspension_reason);
        session.set_do_not_reinstate(self.do_not_reinstate);
        for evidence in self.evidence {
            session.attach_evidence(evidence)?;
        }

        Ok(session)
    }
}
