//! End-to-end validation and scoring flows.

use ideate_engine::adapters::judge::{MockJudge, MockJudgeError};
use ideate_engine::domain::foundation::{Score, Stage};
use ideate_engine::domain::insights::{InsightTracker, InteractionRecord};
use ideate_engine::domain::rules::ValidationEngine;
use ideate_engine::domain::scoring::{estimate, Rubric, RubricScorer, ScoreError};
use ideate_engine::domain::triggers;

fn complete_response(stage: Stage) -> &'static str {
    match stage {
        Stage::ContextSeed => {
            "Success Today: a working signup page live by tonight.\n\
             Primary Constraint: two free hours after dinner."
        }
        Stage::BrainDump => {
            "Great dump! Key Themes:\n\
             - automation rituals\n- audience building\n- tiny paid tools"
        }
        Stage::MindTrace => {
            "Pattern 1: tool hopping\nEvidence: three abandoned repos this month\nConfidence: High\n\
             Pattern 2: night energy\nEvidence: commits all land after 11pm\nConfidence: Medium\n\n\
             Core Motivation: proving the idea can live outside your head.\n\
             Emotional Shift: from scattered browsing to one build thread."
        }
        Stage::SignalScan => {
            "Winning Signal: the browser extension lit you up most.\n\
             Emotional Mirror: you sound relieved to have one pick.\n\
             Micro-Sprint Plan:\n- sketch the popup\n- wire one shortcut\n- demo to a friend\n\
             Success Metric: five installs by Friday."
        }
        Stage::RapidPrototype => {
            "Prototype Goal: a popup that saves the current tab.\n\
             Won't Build List:\n- sync\n- settings page\n\
             Functional Checkpoint: clicking the icon stores one URL.\n\
             Declare Completion: demo the saved list to one friend."
        }
        Stage::Meta => {
            "## Framework Performance Analysis\n\
             The staged structure kept momentum high and the exit checks caught two thin answers.\n\
             ## Internal Logic Reflection\n\
             Theme selection leaned on recency; a frequency check would balance that bias out.\n\
             ## Actionable Framework Refinements\n\
             Ask for evidence before confidence so patterns ground themselves in observations.\n\
             ## Micro-Action for Immediate Integration\n\
             Open the next session by restating yesterday's winning signal aloud."
        }
    }
}

fn judged_reply(rubric: Rubric) -> String {
    let dims: Vec<String> = rubric
        .dimensions()
        .iter()
        .map(|d| format!("\"{}\": 8", d.name))
        .collect();
    format!(
        "{{\"scores\": {{{}}}, \"patch_note\": \"keep it this concrete\"}}",
        dims.join(", ")
    )
}

#[test]
fn every_stage_accepts_its_complete_response() {
    let engine = ValidationEngine::new();
    for stage in Stage::ALL {
        let verdict = engine.validate(stage, complete_response(stage)).unwrap();
        assert!(
            verdict.exit_rule_met,
            "{stage} rejected a complete response: {}",
            verdict.summary
        );
        assert_eq!(verdict.stage, stage);
    }
}

#[test]
fn every_stage_rejects_an_unrelated_response() {
    let engine = ValidationEngine::new();
    let chatter = "That sounds exciting! Tell me more about what you have in mind.";
    for stage in Stage::ALL {
        let verdict = engine.validate(stage, chatter).unwrap();
        assert!(!verdict.exit_rule_met, "{stage} accepted empty chatter");
        assert!(!verdict.missing().is_empty());
        assert!(verdict.summary.contains("not met"));
    }
}

#[test]
fn validation_is_deterministic() {
    let engine = ValidationEngine::new();
    for stage in Stage::ALL {
        let text = complete_response(stage);
        assert_eq!(
            engine.validate(stage, text).unwrap(),
            engine.validate(stage, text).unwrap()
        );
    }
}

#[test]
fn removing_a_required_section_flips_only_that_requirement() {
    let engine = ValidationEngine::new();
    let full = complete_response(Stage::RapidPrototype);
    let without = full.replace("Functional Checkpoint: clicking the icon stores one URL.\n", "");

    let ok = engine.validate(Stage::RapidPrototype, full).unwrap();
    let broken = engine.validate(Stage::RapidPrototype, &without).unwrap();

    assert!(ok.exit_rule_met);
    assert!(!broken.exit_rule_met);
    assert_eq!(broken.missing(), vec!["Functional Checkpoint"]);
}

#[test]
fn stage_identifiers_resolve_numbers_and_meta() {
    let engine = ValidationEngine::new();
    let verdict = engine
        .validate_id("0", complete_response(Stage::ContextSeed))
        .unwrap();
    assert!(verdict.exit_rule_met);

    let meta = engine
        .validate_id("meta", complete_response(Stage::Meta))
        .unwrap();
    assert_eq!(meta.stage, Stage::Meta);
    assert!(engine.validate_id("banana", "text").is_err());
}

#[test]
fn constrained_stage3_prompt_flips_the_grammar() {
    let engine = ValidationEngine::new();
    let prompt = "I already know my pick. No advice, only confirm it. No ding-ding-ding.";
    assert_eq!(
        triggers::negative_constraints(prompt),
        vec!["no advice", "no ding-ding-ding", "only confirm"]
    );

    let compliant = "Confirmed. Your pick stands.";
    let verdict = engine
        .validate_in_context(Stage::SignalScan, prompt, compliant)
        .unwrap();
    assert!(verdict.exit_rule_met);

    let violating = complete_response(Stage::SignalScan);
    let verdict = engine
        .validate_in_context(Stage::SignalScan, prompt, violating)
        .unwrap();
    assert!(!verdict.exit_rule_met);
}

#[tokio::test]
async fn scorer_parses_a_clean_judge_reply() {
    let judge = MockJudge::new().with_reply(judged_reply(Rubric::Standard));
    let scorer = RubricScorer::new(judge);

    let set = scorer
        .score(complete_response(Stage::SignalScan), false)
        .await
        .unwrap();
    assert_eq!(set.rubric, Rubric::Standard);
    assert_eq!(set.get("clarity"), Some(Score::new(8)));
    assert_eq!(set.patch_note.as_deref(), Some("keep it this concrete"));
}

#[tokio::test]
async fn scorer_recovers_fenced_and_prose_wrapped_payloads() {
    let fenced = format!("Here you go:\n```json\n{}\n```", judged_reply(Rubric::Meta));
    let wrapped = format!("My evaluation: {} hope that helps!", judged_reply(Rubric::Meta));
    let judge = MockJudge::new().with_reply(fenced).with_reply(wrapped);
    let scorer = RubricScorer::new(judge);

    for _ in 0..2 {
        let set = scorer
            .score(complete_response(Stage::Meta), true)
            .await
            .unwrap();
        assert_eq!(set.rubric, Rubric::Meta);
        assert_eq!(set.scores.len(), 3);
    }
}

#[tokio::test]
async fn scorer_surfaces_unusable_replies_instead_of_zeroing() {
    let judge = MockJudge::new()
        .with_reply("I would give this a solid 8 overall.")
        .with_reply(r#"{"scores": {"clarity": 8}}"#);
    let scorer = RubricScorer::new(judge);

    let prose = scorer.score("text", false).await.unwrap_err();
    assert!(matches!(prose, ScoreError::Parse(_)));

    let partial = scorer.score("text", false).await.unwrap_err();
    assert!(partial.to_string().contains("stage_alignment"));
}

#[tokio::test]
async fn scorer_propagates_judge_failures() {
    let judge = MockJudge::new().with_error(MockJudgeError::Unavailable {
        reason: "maintenance".to_string(),
    });
    let scorer = RubricScorer::new(judge);

    let err = scorer.score("text", false).await.unwrap_err();
    assert!(matches!(err, ScoreError::Judge(_)));
}

#[tokio::test]
async fn stage_scoring_sends_the_exchange_to_the_judge() {
    let judge = MockJudge::new().with_reply(judged_reply(Rubric::Standard));
    let scorer = RubricScorer::new(judge.clone());

    scorer
        .score_for_stage(
            Stage::BrainDump,
            "here are all my raw ideas",
            complete_response(Stage::BrainDump),
            false,
        )
        .await
        .unwrap();

    let calls = judge.get_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].system_prompt.contains("Stage 1 (Brain Dump)"));
    assert!(calls[0].user_content.contains("raw ideas"));
    assert!(calls[0].user_content.contains("Key Themes"));
}

#[tokio::test]
async fn validated_and_scored_exchange_feeds_the_tracker() {
    let engine = ValidationEngine::new();
    let judge = MockJudge::new().with_reply(judged_reply(Rubric::Standard));
    let scorer = RubricScorer::new(judge);
    let mut tracker = InsightTracker::new();

    let prompt = "here is everything on my mind about the project";
    let response = complete_response(Stage::BrainDump);

    let verdict = engine.validate(Stage::BrainDump, response).unwrap();
    let scores = scorer.score(response, false).await.unwrap();
    let record = InteractionRecord::new(prompt, response, &verdict, Some(scores));
    tracker.record(&record);

    assert_eq!(tracker.interactions(), 1);
    assert_eq!(tracker.completion_rate(Stage::BrainDump), Some(1.0));
    assert!(!record.is_meta);
}

#[test]
fn heuristic_estimate_is_marked_low_confidence() {
    let engine = ValidationEngine::new();
    let response = complete_response(Stage::ContextSeed);
    let verdict = engine.validate(Stage::ContextSeed, response).unwrap();

    let est = estimate(&verdict, response);
    assert_eq!(est.confidence, "low");
    assert_eq!(est.completeness, Score::MAX);
}
