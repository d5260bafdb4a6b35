//! Frequency tables over a collection of records.

use std::collections::BTreeMap;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use super::post::{Post, ReactionKind};

/// Counts keyed by field value.
pub type FrequencyTable = BTreeMap<String, u64>;

/// A record with fields worth counting.
///
/// `tallied_fields` yields `(table name, value)` pairs; every record of a type
/// should name the same tables so totals line up.
pub trait Tally {
    fn tallied_fields(&self) -> Vec<(&'static str, String)>;
}

/// Total count plus one frequency table per tracked field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total: u64,
    #[serde(flatten)]
    pub tables: BTreeMap<String, FrequencyTable>,
}

impl Stats {
    pub fn table(&self, name: &str) -> Option<&FrequencyTable> {
        self.tables.get(name)
    }

    /// Count for `value` in table `name`, zero when never seen.
    pub fn count(&self, name: &str, value: &str) -> u64 {
        self.table(name)
            .and_then(|t| t.get(value))
            .copied()
            .unwrap_or(0)
    }
}

/// Fold records into frequency tables.
pub fn compute_stats<'a, T, I>(records: I) -> Stats
where
    T: Tally + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut stats = Stats::default();
    for record in records {
        stats.total += 1;
        for (name, value) in record.tallied_fields() {
            *stats
                .tables
                .entry(name.to_string())
                .or_default()
                .entry(value)
                .or_insert(0) += 1;
        }
    }
    stats
}

impl Tally for Post {
    fn tallied_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("byCategory", self.category.to_string()),
            ("byHour", format!("{:02}", self.created_at.hour())),
        ]
    }
}

/// Post statistics: frequency tables plus interaction totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    #[serde(flatten)]
    pub stats: Stats,
    pub reactions: BTreeMap<String, u64>,
    pub total_comments: u64,
}

impl PostStats {
    pub fn from_posts(posts: &[Post]) -> Self {
        let mut reactions: BTreeMap<String, u64> = ReactionKind::ALL
            .iter()
            .map(|k| (k.to_string(), 0))
            .collect();
        let mut total_comments = 0;

        for post in posts {
            for kind in ReactionKind::ALL {
                *reactions.entry(kind.to_string()).or_insert(0) += post.reactions.get(kind);
            }
            total_comments += post.comments.len() as u64;
        }

        Self {
            stats: compute_stats(posts),
            reactions,
            total_comments,
        }
    }
}
