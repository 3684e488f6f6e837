use crate::infra::parse_variant;
use crate::review::render_outcome;
use chrono::Utc;
use clap::Args;
use moderation_review::error::AppError;
use moderation_review::workflows::review::{
    Answer, EntityId, FormVariant, NoteKind, Question, ReviewSession, SuspensionReason,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Form variant used for the walkthrough. Defaults to APP_REVIEW_VARIANT.
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: Option<FormVariant>,
}

struct DemoScenario {
    title: &'static str,
    entity: &'static str,
    answers: &'static [(Question, Answer)],
    suspension_reason: Option<SuspensionReason>,
}

const SCENARIOS: [DemoScenario; 4] = [
    DemoScenario {
        title: "Platform entity with a confirmed high risk signal",
        entity: "site-platform-001",
        answers: &[
            (Question::SecondOpinion, Answer::No),
            (Question::PlatformOrEnterprise, Answer::Yes),
            (Question::HighRiskSignal, Answer::Yes),
        ],
        suspension_reason: None,
    },
    DemoScenario {
        title: "Reviewer asks for a second opinion",
        entity: "site-platform-002",
        answers: &[
            (Question::SecondOpinion, Answer::Yes),
            (Question::PlatformOrEnterprise, Answer::Yes),
            (Question::HighRiskSignal, Answer::Yes),
        ],
        suspension_reason: None,
    },
    DemoScenario {
        title: "Nothing answered yet",
        entity: "acct-untouched-003",
        answers: &[],
        suspension_reason: None,
    },
    DemoScenario {
        title: "Medium risk signals on a non-platform site",
        entity: "site-phish-004",
        answers: &[
            (Question::PlatformOrEnterprise, Answer::No),
            (Question::MediumRiskSignal, Answer::Yes),
        ],
        suspension_reason: Some(SuspensionReason::Phishing),
    },
];

pub(crate) fn run_demo(args: DemoArgs, default_variant: FormVariant) -> Result<(), AppError> {
    let variant = args.variant.unwrap_or(default_variant);

    println!("Moderation review demo ({variant} form)");
    for (idx, scenario) in SCENARIOS.iter().enumerate() {
        let mut session = ReviewSession::new(EntityId(scenario.entity.to_string()), variant);
        for (question, answer) in scenario.answers {
            session.answer(*question, *answer)?;
        }
        if session.answers().is_yes(Question::SecondOpinion) {
            session.attach_note(NoteKind::SecondOpinionReason, "escalated during demo");
        }
        session.set_suspension_reason(scenario.suspension_reason);

        println!("\nScenario {}: {}", idx + 1, scenario.title);
        let outcome = session.submit(Utc::now());
        render_outcome(&outcome);
    }

    Ok(())
}
