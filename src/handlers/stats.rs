//! `GET /api/stats`.

use futures_util::future::{self, FutureExt};
use serde::{Deserialize, Serialize};

use crate::handlers::{Handler, HandlerFuture};
use crate::http::{ApiRequest, Reply};

/// Platform-wide counters shown on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub bugs_reported: u64,
    pub active_researchers: u64,
    pub rewards_distributed: String,
    pub projects_protected: u64,
}

impl Stats {
    /// Fixed figures until stats come from storage.
    pub fn sample() -> Self {
        Self {
            bugs_reported: 15_234,
            active_researchers: 3_421,
            rewards_distributed: "$248,500".to_string(),
            projects_protected: 892,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StatsHandler;

impl Handler for StatsHandler {
    fn name(&self) -> &'static str {
        "stats"
    }

    fn handle<'a>(&'a self, _req: &'a ApiRequest) -> HandlerFuture<'a> {
        future::ready(Reply::ok(&Stats::sample())).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, StatusCode};

    #[tokio::test]
    async fn test_stats_payload() {
        let req = ApiRequest::new(Method::GET, "/api/stats");
        let reply = StatsHandler.handle(&req).await.unwrap();
        assert_eq!(reply.status, StatusCode::OK);

        let stats: Stats = serde_json::from_slice(&reply.body).unwrap();
        assert_eq!(stats, Stats::sample());
        assert_eq!(stats.rewards_distributed, "$248,500");
    }
}
