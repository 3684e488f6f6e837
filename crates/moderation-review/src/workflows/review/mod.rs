//! Moderation review form: reviewer answers, status resolution, and pipeline
//! progress for a flagged site or account.

pub mod answers;
mod error;
pub mod progress;
pub mod resolver;
pub mod router;
pub mod session;
pub mod status;

pub use answers::{Answer, AnswerSet, Question};
pub use error::ReviewError;
pub use progress::{project, Progress, ProgressStep, ProgressView};
pub use resolver::{resolve, Resolution, ResolutionRule, ResolverConfig, StatusResolver};
pub use router::{pipeline_view, resolve_request, review_router, ResolveRequest, ResolveResponse};
pub use session::{
    EntityId, EvidenceDescriptor, NoteKind, ReviewForm, ReviewNotes, ReviewOutcome,
    ReviewSession, SuspensionReason,
};
pub use status::{FormVariant, ReviewStatus, StatusPipeline};
