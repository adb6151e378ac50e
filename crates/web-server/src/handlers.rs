use crate::{AppState, error::AppError};
use axum::{Json, extract::State};
use core_types::{Scenario, Strategy};
use database::ScenarioRun;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// # GET /{bad,good}-query-{scenario}/
///
/// Runs one strategy of a scenario and returns its rows under the scenario's
/// key (`books` or `authors`), the elapsed `query_time` in seconds and the
/// number of SQL statements issued as `query_count`.
pub async fn run_scenario(
    State(state): State<Arc<AppState>>,
    scenario: Scenario,
    strategy: Strategy,
) -> Result<Json<Value>, AppError> {
    let run = state.db_repo.run_scenario(scenario, strategy).await?;
    tracing::info!(
        %scenario,
        %strategy,
        rows = run.rows.len(),
        queries = run.queries,
        query_time = run.elapsed.as_secs_f64(),
        "Scenario served."
    );
    Ok(Json(scenario_body(&run)?))
}

/// Builds `{ "<books|authors>": [...], "query_time": f64, "query_count": n }`.
pub fn scenario_body(run: &ScenarioRun) -> Result<Value, serde_json::Error> {
    let mut body = Map::new();
    body.insert(
        run.scenario.result_key().to_string(),
        serde_json::to_value(&run.rows)?,
    );
    body.insert("query_time".to_string(), Value::from(run.elapsed.as_secs_f64()));
    body.insert("query_count".to_string(), Value::from(run.queries));
    Ok(Value::Object(body))
}

#[derive(Debug, Serialize)]
pub struct ScenarioLinks {
    pub scenario: Scenario,
    pub bad: String,
    pub good: String,
}

/// # GET /
/// Lists every scenario with the paths of its two endpoints.
pub async fn index() -> Json<Vec<ScenarioLinks>> {
    let links = Scenario::ALL
        .into_iter()
        .map(|scenario| ScenarioLinks {
            scenario,
            bad: scenario.path(Strategy::Naive),
            good: scenario.path(Strategy::Optimized),
        })
        .collect();
    Json(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::AuthorBookCount;
    use database::ScenarioRows;
    use std::time::Duration;

    #[test]
    fn body_uses_scenario_key_and_reports_timing() {
        let run = ScenarioRun {
            scenario: Scenario::Aggregation,
            strategy: Strategy::Naive,
            rows: ScenarioRows::AuthorBookCounts(vec![AuthorBookCount {
                author: "Ada Byron".to_string(),
                book_count: 100,
            }]),
            queries: 2,
            elapsed: Duration::from_millis(250),
        };

        let body = scenario_body(&run).unwrap();
        assert_eq!(
            body["authors"],
            serde_json::json!([{ "author": "Ada Byron", "book_count": 100 }])
        );
        assert_eq!(body["query_time"].as_f64(), Some(0.25));
        assert_eq!(body["query_count"], 2);
        assert!(body.get("books").is_none());
    }
}
