//! Mention resolution against the identity registry.

use crate::registry::IdentityRegistry;
use crate::similarity;
use serde::{Deserialize, Serialize};

/// Default acceptance threshold on the 0-100 similarity scale.
pub const DEFAULT_THRESHOLD: f64 = 80.0;

/// Outcome of resolving one mention. Unresolved is a normal outcome, not an
/// error: both fields are null when no candidate reached the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    pub resolved_id: Option<String>,
    pub match_score: Option<f64>,
}

impl ResolutionOutcome {
    pub fn unresolved() -> Self {
        Self {
            resolved_id: None,
            match_score: None,
        }
    }

    pub fn matched(id: String, score: f64) -> Self {
        Self {
            resolved_id: Some(id),
            match_score: Some(score),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_id.is_some()
    }
}

/// Resolves free-text mentions to canonical identifiers.
pub struct Resolver<'a> {
    registry: &'a IdentityRegistry,
    threshold: f64,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a IdentityRegistry, threshold: f64) -> Self {
        Self { registry, threshold }
    }

    /// Find the best-scoring canonical identity for a mention.
    ///
    /// A missing mention resolves to unresolved without touching the scorer.
    /// Candidates are scanned in registry load order; ties at the maximum
    /// score keep the earliest candidate. The threshold is inclusive: a
    /// score exactly at the threshold is accepted.
    ///
    /// One full pass over the registry per call, O(registry size). Fine for
    /// daily batch volumes; this linear scan is the main scalability
    /// ceiling of the design.
    pub fn resolve(&self, mention: Option<&str>) -> ResolutionOutcome {
        let Some(mention) = mention else {
            return ResolutionOutcome::unresolved();
        };

        let mut best: Option<(&str, f64)> = None;
        for candidate in self.registry.iter() {
            let score = similarity::score(mention, &candidate.name);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((candidate.id.as_str(), score));
            }
        }

        match best {
            Some((id, score)) if score >= self.threshold => {
                ResolutionOutcome::matched(id.to_string(), score)
            }
            _ => ResolutionOutcome::unresolved(),
        }
    }
}
