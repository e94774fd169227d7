//! Public lookup of published snapshots.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::models::SavedReport;
use crate::storage::SnapshotStore;

/// What a snapshot id means to the public viewer.
///
/// `Expired` is deliberately distinct from `NotFound`: an expired link once
/// existed and worked, and the viewer tells its visitor so.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    Found(SavedReport),
    NotFound,
    Expired { expired_at: DateTime<Utc> },
}

/// Read-only resolver over the snapshot store.
///
/// A snapshot moves from valid to expired purely as a function of wall-clock
/// time against its stored `expires` field; no flag is ever written and no
/// record ever moves back.
#[derive(Clone)]
pub struct PublicResolver {
    store: Arc<dyn SnapshotStore>,
}

impl PublicResolver {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, id: &str) -> Result<ResolveOutcome> {
        self.resolve_at(id, Utc::now()).await
    }

    /// Resolve with an explicit clock. The snapshot is returned verbatim —
    /// everything was fully aggregated at publish time, so nothing is
    /// recomputed here.
    pub async fn resolve_at(&self, id: &str, now: DateTime<Utc>) -> Result<ResolveOutcome> {
        match self.store.get(id).await? {
            None => Ok(ResolveOutcome::NotFound),
            Some(report) if report.expires < now => Ok(ResolveOutcome::Expired {
                expired_at: report.expires,
            }),
            Some(report) => Ok(ResolveOutcome::Found(report)),
        }
    }
}
