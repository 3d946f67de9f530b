//! Enrichment pipeline - one batch run per calendar date.
//!
//! Loads the identity registry and the day's mention batch, resolves every
//! row in input order, appends the resolution columns, and persists the
//! enriched batch under its own date-qualified key.

use crate::config::ResolutionConfig;
use crate::error::Result;
use crate::registry::IdentityRegistry;
use crate::resolver::{ResolutionOutcome, Resolver};
use crate::store::{ArtifactStore, DatasetKind};
use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{info, warn};

/// Column appended to the batch with the resolved identifier.
pub const RESOLVED_ID_COLUMN: &str = "resolved_id";
/// Column appended to the batch with the accepted match score.
pub const MATCH_SCORE_COLUMN: &str = "match_score";

pub struct EnrichmentPipeline<S: ArtifactStore> {
    store: S,
    config: ResolutionConfig,
}

impl<S: ArtifactStore> EnrichmentPipeline<S> {
    pub fn new(store: S, config: ResolutionConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one enrichment pass for `date`.
    ///
    /// Fails with `DataUnavailable` when the registry or the mention batch
    /// is absent, and with `WriteFailed` when the output cannot be
    /// persisted. Re-running with unchanged inputs produces an identical
    /// enriched batch.
    pub fn run(&self, date: NaiveDate) -> Result<DataFrame> {
        info!("Starting enrichment run for {}", date);

        let registry_csv = self.store.read_text(DatasetKind::Registry, date)?;
        let registry = IdentityRegistry::from_csv(&registry_csv)?;
        info!("Loaded registry with {} identities", registry.len());

        let mut batch = self.store.read_frame(DatasetKind::Mentions, date)?;
        let mentions = mention_values(&batch, &self.config.mention_column);

        let resolver = Resolver::new(&registry, self.config.threshold);
        let outcomes: Vec<ResolutionOutcome> = mentions
            .iter()
            .map(|mention| resolver.resolve(mention.as_deref()))
            .collect();

        let resolved = outcomes.iter().filter(|o| o.is_resolved()).count();
        info!(
            "Resolved {}/{} mentions (threshold {})",
            resolved,
            outcomes.len(),
            self.config.threshold
        );

        let ids: Vec<Option<String>> = outcomes.iter().map(|o| o.resolved_id.clone()).collect();
        let scores: Vec<Option<f64>> = outcomes.iter().map(|o| o.match_score).collect();
        batch.with_column(Series::new(RESOLVED_ID_COLUMN, ids))?;
        batch.with_column(Series::new(MATCH_SCORE_COLUMN, scores))?;

        self.store
            .write_frame(DatasetKind::Enriched, date, &mut batch)?;
        info!("Enriched batch for {} persisted", date);

        Ok(batch)
    }
}

/// Extract the mention text of every row, preserving row order.
///
/// Rows whose cell is null, and rows whose cell cannot be read as text at
/// all, come back as `None` and resolve as unresolved rather than aborting
/// the batch. A missing column downgrades the entire batch the same way.
fn mention_values(batch: &DataFrame, column: &str) -> Vec<Option<String>> {
    let Ok(col) = batch.column(column) else {
        warn!(
            "Mention column '{}' missing from batch; treating all {} rows as unresolved",
            column,
            batch.height()
        );
        return vec![None; batch.height()];
    };

    // Numeric or other non-string payloads still resolve on their text form
    let col = if matches!(col.dtype(), DataType::String) {
        col.clone()
    } else {
        match col.cast(&DataType::String) {
            Ok(cast) => cast,
            Err(e) => {
                warn!(
                    "Mention column '{}' unreadable as text ({}); treating all rows as unresolved",
                    column, e
                );
                return vec![None; batch.height()];
            }
        }
    };

    match col.str() {
        Ok(values) => (0..values.len())
            .map(|i| values.get(i).map(|s| s.to_string()))
            .collect(),
        Err(e) => {
            warn!(
                "Mention column '{}' unreadable as text ({}); treating all rows as unresolved",
                column, e
            );
            vec![None; batch.height()]
        }
    }
}
