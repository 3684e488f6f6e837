use moderation_review::workflows::review::{
    project, resolve, Answer, AnswerSet, FormVariant, Question, ReviewStatus, StatusPipeline,
    StatusResolver,
};

/// Every possible answer set: 3^6 combinations.
fn all_answer_sets() -> Vec<AnswerSet> {
    Question::ordered()
        .into_iter()
        .fold(vec![AnswerSet::new()], |sets, question| {
            sets.into_iter()
                .flat_map(|set| {
                    Answer::all()
                        .into_iter()
                        .map(move |answer| set.with(question, answer))
                })
                .collect()
        })
}

fn resolvers() -> [(FormVariant, StatusResolver); 2] {
    [
        (
            FormVariant::Base,
            StatusResolver::for_variant(FormVariant::Base),
        ),
        (
            FormVariant::Extended,
            StatusResolver::for_variant(FormVariant::Extended),
        ),
    ]
}

fn any_risk(set: &AnswerSet) -> bool {
    set.is_yes(Question::HighRiskSignal) || set.is_yes(Question::MediumRiskSignal)
}

#[test]
fn enumeration_covers_every_combination() {
    let sets = all_answer_sets();
    assert_eq!(sets.len(), 729);
}

#[test]
fn unanswered_form_resolves_to_open_on_both_variants() {
    for (_, resolver) in resolvers() {
        assert_eq!(resolver.resolve(&AnswerSet::new()), ReviewStatus::Open);
    }
}

#[test]
fn second_opinion_dominates_every_other_answer() {
    for (variant, resolver) in resolvers() {
        for set in all_answer_sets()
            .into_iter()
            .filter(|set| set.is_yes(Question::SecondOpinion))
        {
            assert_eq!(
                resolver.resolve(&set),
                ReviewStatus::NeedsSecondOpinion,
                "{variant} form, answers {set:?}"
            );
        }
    }
}

#[test]
fn platform_with_risk_signal_goes_to_outreach() {
    for (variant, resolver) in resolvers() {
        for set in all_answer_sets().into_iter().filter(|set| {
            !set.is_yes(Question::SecondOpinion)
                && set.is_yes(Question::PlatformOrEnterprise)
                && any_risk(set)
        }) {
            assert_eq!(
                resolver.resolve(&set),
                ReviewStatus::Outreach,
                "{variant} form, answers {set:?}"
            );
        }
    }
}

#[test]
fn remaining_positive_signals_go_to_ready_to_action() {
    for (variant, resolver) in resolvers() {
        for set in all_answer_sets().into_iter().filter(|set| {
            !set.is_yes(Question::SecondOpinion)
                && !(set.is_yes(Question::PlatformOrEnterprise) && any_risk(set))
        }) {
            let signalled = variant
                .catch_all_signals()
                .iter()
                .any(|signal| set.is_yes(*signal));
            let expected = if signalled {
                ReviewStatus::ReadyToAction
            } else {
                ReviewStatus::Open
            };
            assert_eq!(
                resolver.resolve(&set),
                expected,
                "{variant} form, answers {set:?}"
            );
        }
    }
}

#[test]
fn no_and_unanswered_are_interchangeable() {
    for (variant, resolver) in resolvers() {
        for set in all_answer_sets() {
            let baseline = resolver.resolve(&set);
            for question in Question::ordered() {
                let swapped = match set.get(question) {
                    Answer::No => Answer::Unanswered,
                    Answer::Unanswered => Answer::No,
                    Answer::Yes => continue,
                };
                assert_eq!(
                    resolver.resolve(&set.with(question, swapped)),
                    baseline,
                    "{variant} form, swapping {question} in {set:?}"
                );
            }
        }
    }
}

#[test]
fn resolution_is_deterministic() {
    let resolver = StatusResolver::for_variant(FormVariant::Extended);
    for set in all_answer_sets() {
        assert_eq!(resolver.explain(&set), resolver.explain(&set));
    }
}

#[test]
fn resolved_status_always_sits_on_the_variant_pipeline() {
    for (variant, resolver) in resolvers() {
        let pipeline = variant.pipeline();
        for set in all_answer_sets() {
            assert!(pipeline.position(resolver.resolve(&set)).is_some());
        }
    }
}

#[test]
fn scenario_platform_with_high_risk() {
    let set = AnswerSet::new()
        .with(Question::SecondOpinion, Answer::No)
        .with(Question::PlatformOrEnterprise, Answer::Yes)
        .with(Question::HighRiskSignal, Answer::Yes)
        .with(Question::MediumRiskSignal, Answer::Unanswered);

    let status = resolve(&set);
    let progress = project(status, &StatusPipeline::base());

    assert_eq!(status, ReviewStatus::Outreach);
    assert_eq!(progress.index, 2);
    assert!((progress.fraction - 2.0 / 6.0).abs() < 1e-6);
}

#[test]
fn scenario_second_opinion_dominance() {
    let set = AnswerSet::new()
        .with(Question::SecondOpinion, Answer::Yes)
        .with(Question::PlatformOrEnterprise, Answer::Yes)
        .with(Question::HighRiskSignal, Answer::Yes);

    let status = resolve(&set);
    let progress = project(status, &StatusPipeline::base());

    assert_eq!(status, ReviewStatus::NeedsSecondOpinion);
    assert_eq!(progress.index, 3);
    assert_eq!(progress.fraction, 0.5);
}

#[test]
fn scenario_all_unanswered() {
    let status = resolve(&AnswerSet::new());
    let progress = project(status, &StatusPipeline::base());

    assert_eq!(status, ReviewStatus::Open);
    assert_eq!(progress.index, 0);
    assert_eq!(progress.fraction, 0.0);
}

#[test]
fn scenario_medium_risk_without_platform() {
    let set = AnswerSet::new()
        .with(Question::PlatformOrEnterprise, Answer::No)
        .with(Question::MediumRiskSignal, Answer::Yes);

    let status = resolve(&set);
    let progress = project(status, &StatusPipeline::base());

    assert_eq!(status, ReviewStatus::ReadyToAction);
    assert_eq!(progress.index, 5);
    assert!((progress.fraction - 5.0 / 6.0).abs() < 1e-6);
}

#[test]
fn projection_is_monotonic_and_bounded_on_both_pipelines() {
    for variant in FormVariant::ordered() {
        let pipeline = variant.pipeline();
        let fractions: Vec<f32> = pipeline
            .steps()
            .iter()
            .map(|status| project(*status, &pipeline).fraction)
            .collect();

        assert!(fractions.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(fractions.first().copied(), Some(0.0));
        assert_eq!(fractions.last().copied(), Some(1.0));
        assert_eq!(
            project(variant.terminal_status(), &pipeline).index,
            pipeline.len() - 1
        );
    }
}
