use crate::infra::{parse_answer, parse_variant};
use chrono::Utc;
use clap::Args;
use moderation_review::error::AppError;
use moderation_review::workflows::review::{
    pipeline_view, resolve_request, Answer, AnswerSet, FormVariant, ProgressView, Question,
    ResolveRequest, ReviewForm, ReviewOutcome,
};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ReviewResolveArgs {
    /// Form variant (base or extended). Defaults to APP_REVIEW_VARIANT.
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: Option<FormVariant>,
    /// Is this a Platform/Enterprise? (yes/no)
    #[arg(long, value_parser = parse_answer, default_value = "unanswered")]
    pub(crate) platform: Answer,
    /// Is this a Visual Directory? (extended form only)
    #[arg(long, value_parser = parse_answer, default_value = "unanswered")]
    pub(crate) visual_directory: Answer,
    /// Found at least 1 high risk signal? (yes/no)
    #[arg(long, value_parser = parse_answer, default_value = "unanswered")]
    pub(crate) high_risk: Answer,
    /// Found at least 3 medium risk signals? (yes/no)
    #[arg(long, value_parser = parse_answer, default_value = "unanswered")]
    pub(crate) medium_risk: Answer,
    /// Found at least 1 good signal? (extended form only)
    #[arg(long, value_parser = parse_answer, default_value = "unanswered")]
    pub(crate) good_signal: Answer,
    /// Is a second opinion needed? (yes/no)
    #[arg(long, value_parser = parse_answer, default_value = "unanswered")]
    pub(crate) second_opinion: Answer,
}

impl ReviewResolveArgs {
    fn answers(&self) -> AnswerSet {
        AnswerSet::new()
            .with(Question::PlatformOrEnterprise, self.platform)
            .with(Question::VisualDirectory, self.visual_directory)
            .with(Question::HighRiskSignal, self.high_risk)
            .with(Question::MediumRiskSignal, self.medium_risk)
            .with(Question::GoodSignal, self.good_signal)
            .with(Question::SecondOpinion, self.second_opinion)
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReviewPipelineArgs {
    /// Form variant (base or extended). Defaults to APP_REVIEW_VARIANT.
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: Option<FormVariant>,
}

#[derive(Args, Debug)]
pub(crate) struct ReviewSubmitArgs {
    /// Path to a JSON review form
    #[arg(long)]
    pub(crate) form: PathBuf,
    /// Print the outcome as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_review_resolve(
    args: ReviewResolveArgs,
    default_variant: FormVariant,
) -> Result<(), AppError> {
    let request = ResolveRequest {
        variant: args.variant,
        answers: args.answers(),
    };
    let response = resolve_request(request, default_variant);

    println!("Review status ({} form)", response.variant);
    println!("Status: {}", response.status_label);
    println!("Rationale: {}", response.rationale);
    if !response.ignored.is_empty() {
        let ignored: Vec<&str> = response.ignored.iter().map(|question| question.label()).collect();
        println!("Ignored (not asked on this form): {}", ignored.join(", "));
    }
    render_progress(&response.progress);
    Ok(())
}

pub(crate) fn run_review_pipeline(
    args: ReviewPipelineArgs,
    default_variant: FormVariant,
) -> Result<(), AppError> {
    let view = pipeline_view(args.variant.unwrap_or(default_variant));

    println!("Status pipeline ({} form)", view.variant);
    for (idx, step) in view.steps.iter().enumerate() {
        println!("{}. {}", idx + 1, step.label);
    }

    println!("\nQuestions");
    for question in &view.questions {
        println!("- {}: {}", question.key, question.prompt);
    }
    Ok(())
}

pub(crate) fn run_review_submit(
    args: ReviewSubmitArgs,
    default_variant: FormVariant,
) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.form)?;
    let outcome = submit_form(&raw, default_variant)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        render_outcome(&outcome);
    }
    Ok(())
}

pub(crate) fn submit_form(raw: &str, default_variant: FormVariant) -> Result<ReviewOutcome, AppError> {
    let form: ReviewForm = serde_json::from_str(raw)?;
    let mut session = form.into_session(default_variant)?;
    Ok(session.submit(Utc::now()))
}

pub(crate) fn render_outcome(outcome: &ReviewOutcome) {
    println!("Review of {} ({} form)", outcome.entity, outcome.variant);
    println!("Status: {}", outcome.status_label);
    println!("Rationale: {}", outcome.rationale);
    render_progress(&outcome.progress);

    let answered: Vec<String> = outcome
        .answers
        .answered()
        .map(|(question, answer)| format!("{question}: {answer}"))
        .collect();
    if answered.is_empty() {
        println!("\nAnswers: none recorded");
    } else {
        println!("\nAnswers");
        for line in answered {
            println!("- {line}");
        }
    }

    match outcome.suspension_reason {
        Some(reason) => println!("\nSuspension reason: {}", reason.label()),
        None => println!("\nSuspension reason: none"),
    }
    if outcome.do_not_reinstate {
        println!("Do not reinstate: yes");
    }

    if !outcome.evidence.is_empty() {
        println!("\nEvidence");
        for evidence in &outcome.evidence {
            let size_note = match evidence.size_bytes {
                Some(size) => format!(" ({size} bytes)"),
                None => String::new(),
            };
            println!("- {}{}", evidence.file_name, size_note);
        }
    }
}

fn render_progress(progress: &ProgressView) {
    println!("Progress: {}", progress.bar());
    for step in &progress.steps {
        let marker = if step.active {
            ">"
        } else if step.reached {
            "x"
        } else {
            " "
        };
        println!("  [{marker}] {}", step.label);
    }
}
