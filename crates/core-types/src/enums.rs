use crate::error::CoreError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One of the four query patterns the service demonstrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Books listed together with their author's name.
    #[serde(rename = "n-plus-1")]
    NPlusOne,
    /// Number of books written by each author.
    Aggregation,
    /// Books published after a given year.
    Filtering,
    /// Every author with the titles of all their books.
    ManyToMany,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::NPlusOne,
        Scenario::Aggregation,
        Scenario::Filtering,
        Scenario::ManyToMany,
    ];

    /// The URL slug used by both endpoints of this scenario.
    pub fn slug(&self) -> &'static str {
        match self {
            Scenario::NPlusOne => "n-plus-1",
            Scenario::Aggregation => "aggregation",
            Scenario::Filtering => "filtering",
            Scenario::ManyToMany => "many-to-many",
        }
    }

    /// The key holding the result list in the JSON response.
    pub fn result_key(&self) -> &'static str {
        match self {
            Scenario::NPlusOne | Scenario::Filtering => "books",
            Scenario::Aggregation | Scenario::ManyToMany => "authors",
        }
    }

    /// Route path for one strategy of this scenario, e.g. `/bad-query-filtering/`.
    pub fn path(&self, strategy: Strategy) -> String {
        format!("/{}-query-{}/", strategy.prefix(), self.slug())
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Scenario {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n-plus-1" | "foreign-key" => Ok(Scenario::NPlusOne),
            "aggregation" => Ok(Scenario::Aggregation),
            "filtering" => Ok(Scenario::Filtering),
            "many-to-many" => Ok(Scenario::ManyToMany),
            other => Err(CoreError::InvalidInput("scenario".to_string(), other.to_string())),
        }
    }
}

/// How a scenario's data is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Lazy, per-row loading or in-application work.
    Naive,
    /// Joins, aggregation and filtering pushed into the database.
    Optimized,
}

impl Strategy {
    /// Route prefix: `bad` or `good`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Strategy::Naive => "bad",
            Strategy::Optimized => "good",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Naive => f.write_str("naive"),
            Strategy::Optimized => f.write_str("optimized"),
        }
    }
}
