//! Recommendation lifecycle through the engine: single-flight, stale results,
//! cancellation and edits made while a request is outstanding.
#![recursion_limit = "256"]


use pretty_assertions::assert_eq;
use scorecast::assert_result_err;
use scorecast::errors::{AdvisoryFailure, Error};
use scorecast::testkit::{sample_portfolio, valid_advisory_response, ScriptedAdvisor};
use scorecast::{
    DiscardReason, IndicatorKey, RecommendationOutcome, RecommendationProvider, ScoreEngine,
    Status,
};
use serde_json::json;
use std::sync::Arc;
use tokio::task::JoinHandle;

fn key() -> IndicatorKey {
    IndicatorKey::new("alpha", "alpha-01")
}

fn engine_with(advisor: &ScriptedAdvisor) -> Arc<ScoreEngine> {
    Arc::new(ScoreEngine::new(
        sample_portfolio(),
        RecommendationProvider::new(Arc::new(advisor.clone())),
    ))
}

fn spawn_request(
    engine: &Arc<ScoreEngine>,
) -> JoinHandle<scorecast::Result<RecommendationOutcome>> {
    let engine = Arc::clone(engine);
    tokio::spawn(async move { engine.request_recommendation(&key()).await })
}

#[tokio::test]
async fn test_advisory_recommendation_is_applied() {
    let advisor = ScriptedAdvisor::new().respond(valid_advisory_response(82.0, 61.5));
    let engine = engine_with(&advisor);

    let outcome = engine.request_recommendation(&key()).await.unwrap();
    assert!(outcome.is_applied());

    let rec = engine.get_recommendation(&key()).unwrap().unwrap();
    assert_eq!(rec.recommended_score(), 82.0);
    assert_eq!(rec.warning_score(), 61.5);
    assert!(!rec.is_estimated());
    assert_eq!(engine.get_status(&key()).unwrap(), Status::InProgress);

    let requests = advisor.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].grouping_name, "Alpha Line");
    assert_eq!(requests[0].indicator_name, "Indicator 1");
    assert_eq!(requests[0].statistics.mean, 70.0);
    assert!(requests[0].prompt.contains("period 5"));
}

#[tokio::test]
async fn test_second_request_while_in_flight_is_rejected() {
    let advisor = ScriptedAdvisor::new()
        .respond(valid_advisory_response(82.0, 61.5))
        .gated();
    let engine = engine_with(&advisor);

    let first = spawn_request(&engine);
    advisor.wait_until_called().await;
    assert!(engine.is_analyzing(&key()));

    let second = engine.request_recommendation(&key()).await;
    let err = assert_result_err!(second);
    assert!(matches!(err, Error::RecommendationInFlight { .. }));

    advisor.release();
    assert!(first.await.unwrap().unwrap().is_applied());
    assert!(!engine.is_analyzing(&key()));
    assert_eq!(advisor.call_count(), 1);
}

#[tokio::test]
async fn test_other_indicators_are_not_blocked() {
    let advisor = ScriptedAdvisor::new()
        .respond(valid_advisory_response(82.0, 61.5))
        .respond(valid_advisory_response(10.0, 5.0))
        .gated();
    let engine = engine_with(&advisor);

    let first = spawn_request(&engine);
    advisor.wait_until_called().await;

    let other = IndicatorKey::new("beta", "beta-02");
    let engine_for_other = Arc::clone(&engine);
    let other_key = other.clone();
    let second =
        tokio::spawn(async move { engine_for_other.request_recommendation(&other_key).await });
    advisor.wait_until_called().await;
    assert!(engine.is_analyzing(&other));

    advisor.release();
    advisor.release();
    assert!(first.await.unwrap().unwrap().is_applied());
    assert!(second.await.unwrap().unwrap().is_applied());
}

#[tokio::test]
async fn test_score_edit_during_request_discards_result() {
    let advisor = ScriptedAdvisor::new()
        .respond(valid_advisory_response(82.0, 61.5))
        .gated();
    let engine = engine_with(&advisor);

    let request = spawn_request(&engine);
    advisor.wait_until_called().await;
    engine.set_score(&key(), 4, 95.0).unwrap();
    advisor.release();

    let outcome = request.await.unwrap().unwrap();
    assert_eq!(
        outcome,
        RecommendationOutcome::Discarded {
            recommendation: outcome.recommendation().clone(),
            reason: DiscardReason::Stale,
        }
    );
    assert_eq!(engine.get_recommendation(&key()).unwrap(), None);
    assert_eq!(engine.get_status(&key()).unwrap(), Status::Pending);
    assert_eq!(engine.get_statistics(&key()).unwrap().max, 95.0);
}

#[tokio::test]
async fn test_rename_during_request_keeps_result() {
    let advisor = ScriptedAdvisor::new()
        .respond(valid_advisory_response(82.0, 61.5))
        .gated();
    let engine = engine_with(&advisor);

    let request = spawn_request(&engine);
    advisor.wait_until_called().await;
    engine.rename_indicator(&key(), "Scrap rate").unwrap();
    advisor.release();

    assert!(request.await.unwrap().unwrap().is_applied());
    let overview = engine.get_overview(&key()).unwrap();
    assert_eq!(overview.name, "Scrap rate");
    assert_eq!(overview.status, Status::InProgress);
}

#[tokio::test]
async fn test_cancelled_request_is_discarded_and_slot_reusable() {
    let advisor = ScriptedAdvisor::new()
        .respond(valid_advisory_response(82.0, 61.5))
        .respond(valid_advisory_response(75.0, 60.0))
        .gated();
    let engine = engine_with(&advisor);

    let first = spawn_request(&engine);
    advisor.wait_until_called().await;
    assert!(engine.cancel_recommendation(&key()));
    assert!(!engine.is_analyzing(&key()));

    let second = spawn_request(&engine);
    advisor.wait_until_called().await;
    assert!(engine.is_analyzing(&key()));

    advisor.release();
    let first = first.await.unwrap().unwrap();
    assert!(matches!(
        first,
        RecommendationOutcome::Discarded {
            reason: DiscardReason::Cancelled,
            ..
        }
    ));
    // the abandoned request must not clear the newer request's slot
    assert!(engine.is_analyzing(&key()));

    advisor.release();
    assert!(second.await.unwrap().unwrap().is_applied());
    let rec = engine.get_recommendation(&key()).unwrap().unwrap();
    assert_eq!(rec.recommended_score(), 75.0);
}

#[tokio::test]
async fn test_cancelled_request_keeps_previous_recommendation() {
    let advisor = ScriptedAdvisor::new()
        .respond(valid_advisory_response(82.0, 61.5))
        .respond(valid_advisory_response(95.0, 70.0))
        .gated();
    let engine = engine_with(&advisor);

    let first = spawn_request(&engine);
    advisor.wait_until_called().await;
    advisor.release();
    assert!(first.await.unwrap().unwrap().is_applied());

    let second = spawn_request(&engine);
    advisor.wait_until_called().await;
    assert!(engine.cancel_recommendation(&key()));
    advisor.release();
    let second = second.await.unwrap().unwrap();
    assert_eq!(second.recommendation().recommended_score(), 95.0);
    assert!(!second.is_applied());

    let stored = engine.get_recommendation(&key()).unwrap().unwrap();
    assert_eq!(stored.recommended_score(), 82.0);
    assert_eq!(stored.warning_score(), 61.5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancel_racing_completion_never_half_applies() {
    for _ in 0..20 {
        let advisor = ScriptedAdvisor::new()
            .respond(valid_advisory_response(82.0, 61.5))
            .gated();
        let engine = engine_with(&advisor);

        let request = spawn_request(&engine);
        advisor.wait_until_called().await;
        advisor.release();
        let cancelled = engine.cancel_recommendation(&key());

        let outcome = request.await.unwrap().unwrap();
        let stored = engine.get_recommendation(&key()).unwrap();
        assert_eq!(outcome.is_applied(), !cancelled);
        assert_eq!(outcome.is_applied(), stored.is_some());
        assert!(!engine.is_analyzing(&key()));
    }
}

#[tokio::test]
async fn test_reset_after_recommendation_clears_everything() {
    let advisor = ScriptedAdvisor::new().respond(valid_advisory_response(82.0, 61.5));
    let engine = engine_with(&advisor);
    engine.request_recommendation(&key()).await.unwrap();

    engine.reset_indicator(&key()).unwrap();
    assert_eq!(engine.get_recommendation(&key()).unwrap(), None);
    assert_eq!(engine.get_statistics(&key()).unwrap().mean, 0.0);
    assert!(engine.get_portfolio_report().is_empty_portfolio);
    assert!(engine.get_portfolio_report().groupings.is_empty());
}

#[tokio::test]
async fn test_unusable_responses_fall_back_to_estimate() {
    let advisor = ScriptedAdvisor::new()
        .respond(json!({"recommendedScore": "high"}))
        .fail(AdvisoryFailure::Transport("connection refused".into()));
    let engine = engine_with(&advisor);

    for _ in 0..2 {
        let outcome = engine.request_recommendation(&key()).await.unwrap();
        assert!(outcome.is_applied());
        assert!(outcome.recommendation().is_estimated());
        assert_eq!(outcome.recommendation().recommended_score(), 73.54);
        assert_eq!(outcome.recommendation().warning_score(), 62.93);
    }
}

#[tokio::test]
async fn test_label_edit_invalidates_recommendation() {
    let advisor = ScriptedAdvisor::new().respond(valid_advisory_response(82.0, 61.5));
    let engine = engine_with(&advisor);
    engine.request_recommendation(&key()).await.unwrap();

    engine.set_period_label(&key(), 1, "January").unwrap();
    assert_eq!(engine.get_recommendation(&key()).unwrap(), None);
}
