use comfy_table::Table;
use core_types::{Scenario, Strategy};
use database::{DbError, DbRepository, ScenarioRun};
use std::time::Duration;

/// Both strategies of one scenario, run back to back on the same data.
pub struct Comparison {
    pub scenario: Scenario,
    pub naive: ScenarioRun,
    pub optimized: ScenarioRun,
}

impl Comparison {
    pub fn identical(&self) -> bool {
        self.naive.rows == self.optimized.rows
    }
}

/// Runs each given scenario with both strategies, naive first.
pub async fn compare_all(
    repo: &DbRepository,
    scenarios: &[Scenario],
) -> Result<Vec<Comparison>, DbError> {
    let mut comparisons = Vec::with_capacity(scenarios.len());
    for &scenario in scenarios {
        tracing::info!(%scenario, "Comparing strategies...");
        let naive = repo.run_scenario(scenario, Strategy::Naive).await?;
        let optimized = repo.run_scenario(scenario, Strategy::Optimized).await?;
        comparisons.push(Comparison {
            scenario,
            naive,
            optimized,
        });
    }
    Ok(comparisons)
}

/// How many times faster the optimized strategy ran. `None` when it took no measurable time.
pub fn speedup(naive: Duration, optimized: Duration) -> Option<f64> {
    let optimized = optimized.as_secs_f64();
    (optimized > 0.0).then(|| naive.as_secs_f64() / optimized)
}

pub fn render(comparisons: &[Comparison]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Scenario",
        "Rows",
        "Naive queries",
        "Naive time (s)",
        "Optimized queries",
        "Optimized time (s)",
        "Speed-up",
        "Identical",
    ]);

    for c in comparisons {
        let speedup = speedup(c.naive.elapsed, c.optimized.elapsed)
            .map(|x| format!("{x:.1}x"))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            c.scenario.to_string(),
            c.optimized.rows.len().to_string(),
            c.naive.queries.to_string(),
            format!("{:.4}", c.naive.elapsed.as_secs_f64()),
            c.optimized.queries.to_string(),
            format!("{:.4}", c.optimized.elapsed.as_secs_f64()),
            speedup,
            if c.identical() { "yes" } else { "NO" }.to_string(),
        ]);
    }

    table
}
