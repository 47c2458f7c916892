//! `GET /api/bugs`.

use futures_util::future::{self, FutureExt};
use serde::{Deserialize, Serialize};

use crate::handlers::{Handler, HandlerFuture};
use crate::http::{ApiRequest, Reply};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BugStatus {
    Open,
    Verified,
    Closed,
}

/// A reported vulnerability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bug {
    pub id: u64,
    pub title: String,
    pub severity: Severity,
    pub status: BugStatus,
    pub reporter: String,
    pub reward: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugList {
    pub bugs: Vec<Bug>,
    pub total: usize,
}

impl BugList {
    pub fn new(bugs: Vec<Bug>) -> Self {
        let total = bugs.len();
        Self { bugs, total }
    }
}

/// Sample reports until bugs come from storage.
pub fn sample_bugs() -> Vec<Bug> {
    vec![
        Bug {
            id: 1,
            title: "SQL Injection in login form".to_string(),
            severity: Severity::Critical,
            status: BugStatus::Open,
            reporter: "alice".to_string(),
            reward: 500,
        },
        Bug {
            id: 2,
            title: "XSS vulnerability in comments".to_string(),
            severity: Severity::High,
            status: BugStatus::Verified,
            reporter: "bob".to_string(),
            reward: 300,
        },
    ]
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BugsHandler;

impl Handler for BugsHandler {
    fn name(&self) -> &'static str {
        "bugs_list"
    }

    fn handle<'a>(&'a self, _req: &'a ApiRequest) -> HandlerFuture<'a> {
        future::ready(Reply::ok(&BugList::new(sample_bugs()))).boxed()
    }
}
