//! Day-keyed match fixtures, read through the artifact store.

use crate::error::Result;
use crate::store::{ArtifactStore, DatasetKind};
use chrono::NaiveDate;
use serde_json::Value;

/// Load the day's fixtures as JSON records. Absence of the fixtures
/// artifact surfaces as `DataUnavailable`.
pub fn load_fixtures<S: ArtifactStore>(store: &S, date: NaiveDate) -> Result<Vec<Value>> {
    let text = store.read_text(DatasetKind::Fixtures, date)?;
    let fixtures: Vec<Value> = serde_json::from_str(&text)?;
    Ok(fixtures)
}
