//! `GET /api/leaderboard`.

use futures_util::future::{self, FutureExt};
use serde::{Deserialize, Serialize};

use crate::handlers::{Handler, HandlerFuture};
use crate::http::{ApiRequest, Reply};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    pub points: u64,
    pub bugs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub leaderboard: Vec<LeaderboardEntry>,
}

pub fn sample_leaderboard() -> Leaderboard {
    let entry = |rank, username: &str, points, bugs| LeaderboardEntry {
        rank,
        username: username.to_string(),
        points,
        bugs,
    };
    Leaderboard {
        leaderboard: vec![
            entry(1, "alice", 2500, 45),
            entry(2, "bob", 2100, 38),
            entry(3, "charlie", 1800, 32),
        ],
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardHandler;

impl Handler for LeaderboardHandler {
    fn name(&self) -> &'static str {
        "leaderboard"
    }

    fn handle<'a>(&'a self, _req: &'a ApiRequest) -> HandlerFuture<'a> {
        future::ready(Reply::ok(&sample_leaderboard())).boxed()
    }
}
