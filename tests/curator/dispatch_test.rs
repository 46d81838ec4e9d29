#[path = "support.rs"]
mod support;

use std::sync::Arc;

use drilldown::curator::{CuratorConfig, CuratorError, Curators, DrilldownConfig};
use drilldown::execution::ExecutionError;
use drilldown::request::{Field, Filter};
use serde_json::json;
use support::*;

fn configs() -> Vec<CuratorConfig> {
    vec![
        CuratorConfig::parse("default", &json!({})).unwrap(),
        CuratorConfig::parse(
            "drilldown",
            &json!({"dimension": {"field": "Country"}, "maxRows": 100}),
        )
        .unwrap(),
    ]
}

#[tokio::test]
async fn test_primary_then_drilldown() {
    let pool = Arc::new(CountingExecutor::current());
    let planner = Arc::new(ScriptedPlanner::new(advertiser_model()));
    let executor = Arc::new(ScriptedExecutor::new(Ok(country_rows())));
    let ctx = service(pool, planner.clone(), executor.clone());
    let req = request_context(advertiser_request(3), Arc::new(RecordingLog::default()));

    let submissions = Curators::new().process(&ctx, &req, &configs());
    let names: Vec<&str> = submissions.iter().map(|s| s.curator).collect();
    assert_eq!(names, vec!["default", "drilldown"]);

    let mut outcomes = Vec::new();
    for submission in submissions {
        outcomes.push(submission.outcome().await.unwrap().unwrap());
    }

    let primary = &outcomes[0];
    assert_eq!(primary.curator, "default");
    assert_eq!(*primary.model.request, *req.request);
    assert_eq!(primary.execution, Ok(country_rows()));

    let drill = &outcomes[1];
    assert_eq!(drill.curator, "drilldown");
    assert!(drill
        .model
        .request
        .filter_expressions
        .contains(&Filter::in_values("Country", ["CA", "US"])));

    // primary, join key, secondary
    assert_eq!(planner.seen().len(), 3);
    assert_eq!(executor.calls(), 2);
}

#[tokio::test]
async fn test_primary_failure_surfaces_in_drilldown() {
    let pool = Arc::new(CountingExecutor::current());
    let planner = Arc::new(ScriptedPlanner::new(advertiser_model()));
    let executor = Arc::new(ScriptedExecutor::new(Err(ExecutionError::Failed(
        "timeout".to_string(),
    ))));
    let ctx = service(pool, planner.clone(), executor.clone());
    let req = request_context(advertiser_request(3), Arc::new(RecordingLog::default()));

    let mut submissions = Curators::new().process(&ctx, &req, &configs()).into_iter();
    let primary = submissions.next().unwrap().outcome().await.unwrap().unwrap();
    let drill = submissions.next().unwrap().outcome().await.unwrap();

    assert_eq!(
        primary.execution,
        Err(ExecutionError::Failed("timeout".to_string()))
    );
    match drill {
        Err(err @ CuratorError::PrimaryFailure { .. }) => {
            assert_eq!(err.label(), "drilldown");
            assert!(err.to_string().contains("timeout"));
        }
        other => panic!("expected PrimaryFailure, got {:?}", other),
    }
    assert_eq!(planner.seen().len(), 1);
    assert_eq!(executor.calls(), 1);
}

#[tokio::test]
async fn test_rejected_drilldown_leaves_primary_running() {
    let pool = Arc::new(CountingExecutor::current());
    let planner = Arc::new(ScriptedPlanner::new(advertiser_model()));
    let executor = Arc::new(ScriptedExecutor::new(Ok(country_rows())));
    let ctx = service(pool.clone(), planner, executor);
    let req = request_context(
        advertiser_request(3).with_cube("billing_stats"),
        Arc::new(RecordingLog::default()),
    );

    let submissions = Curators::new().process(&ctx, &req, &configs());
    assert!(submissions[1].handle.is_err());

    let mut submissions = submissions.into_iter();
    let primary = submissions.next().unwrap().outcome().await;
    assert!(matches!(primary, Some(Ok(_))));
    assert!(submissions.next().unwrap().outcome().await.is_none());

    // Only the primary query was scheduled.
    assert_eq!(pool.spawned(), 1);
}

#[tokio::test]
async fn test_rejected_drilldowns_schedule_nothing_beyond_primary() {
    let req = request_context(
        advertiser_request(3).with_cube("billing_stats"),
        Arc::new(RecordingLog::default()),
    );
    let spawned_with = |configs: Vec<CuratorConfig>| {
        let pool = Arc::new(CountingExecutor::current());
        let planner = Arc::new(ScriptedPlanner::new(advertiser_model()));
        let executor = Arc::new(ScriptedExecutor::new(Ok(country_rows())));
        let ctx = service(pool.clone(), planner, executor);
        let submissions = Curators::new().process(&ctx, &req, &configs);
        (pool.spawned(), submissions)
    };

    let (primary_only, _) = spawned_with(vec![CuratorConfig::Default]);
    let mut with_drills = configs();
    with_drills.push(CuratorConfig::Drilldown(DrilldownConfig::new(
        Field::new("Date"),
        10,
    )));
    let (rejected, submissions) = spawned_with(with_drills);

    assert_eq!(primary_only, 1);
    assert_eq!(rejected, primary_only);
    assert!(submissions[1..].iter().all(|s| s.handle.is_err()));
}

#[tokio::test]
async fn test_projection_follows_first_accepted_drilldown() {
    let pool = Arc::new(CountingExecutor::current());
    let planner = Arc::new(ScriptedPlanner::new(advertiser_model()));
    let executor = Arc::new(ScriptedExecutor::new(Ok(country_rows())));
    let ctx = service(pool.clone(), planner, executor.clone());
    let req = request_context(advertiser_request(10), Arc::new(RecordingLog::default()));

    // Ten days is too wide a range for a daily drilldown.
    let configs = vec![
        CuratorConfig::Drilldown(DrilldownConfig::new(Field::new("Date"), 10)),
        CuratorConfig::Drilldown(DrilldownConfig::new(Field::new("Country"), 10)),
    ];
    let submissions = Curators::new().process(&ctx, &req, &configs);
    assert!(submissions[1].handle.is_err());
    assert!(submissions[2].handle.is_ok());

    for submission in submissions {
        submission.outcome().await;
    }
    // default, row projection, one drilldown
    assert_eq!(pool.spawned(), 3);
    assert_eq!(executor.calls(), 2);
}

#[tokio::test]
async fn test_validator_vets_primary_plan_too() {
    let pool = Arc::new(CountingExecutor::current());
    let planner = Arc::new(ScriptedPlanner::new(advertiser_model()));
    let executor = Arc::new(ScriptedExecutor::new(Ok(country_rows())));
    let ctx = service(pool, planner, executor.clone())
        .with_plan_validator(Arc::new(RejectCurator("default")));
    let req = request_context(advertiser_request(3), Arc::new(RecordingLog::default()));

    let mut submissions = Curators::new().process(&ctx, &req, &configs()).into_iter();
    let primary = submissions.next().unwrap().outcome().await.unwrap();
    let drill = submissions.next().unwrap().outcome().await.unwrap();

    match primary {
        Err(CuratorError::ModelGeneration { curator, .. }) => assert_eq!(curator, "default"),
        other => panic!("expected ModelGeneration, got {:?}", other),
    }
    assert!(matches!(drill, Err(CuratorError::PrimaryFailure { .. })));
    assert_eq!(executor.calls(), 0);
}

#[tokio::test]
async fn test_drilldowns_share_one_primary_query() {
    let pool = Arc::new(CountingExecutor::current());
    let planner = Arc::new(ScriptedPlanner::new(advertiser_model()));
    let executor = Arc::new(ScriptedExecutor::new(Ok(country_rows())));
    let ctx = service(pool.clone(), planner, executor.clone());
    let req = request_context(advertiser_request(3), Arc::new(RecordingLog::default()));

    let mut configs = configs();
    configs.push(
        CuratorConfig::parse(
            "drilldown",
            &json!({"dimension": {"field": "Country"}, "maxRows": 10}),
        )
        .unwrap(),
    );

    let submissions = Curators::new().process(&ctx, &req, &configs);
    assert_eq!(submissions.len(), 3);
    for submission in submissions {
        assert!(submission.outcome().await.is_some());
    }

    // default, row projection, two drilldowns
    assert_eq!(pool.spawned(), 4);
    assert_eq!(executor.calls(), 3);
}

#[test]
fn test_unknown_curator_name_is_rejected() {
    let err = CuratorConfig::parse("rollup", &json!({})).unwrap_err();
    assert_eq!(err.errors, vec!["unknown curator 'rollup'".to_string()]);
}
