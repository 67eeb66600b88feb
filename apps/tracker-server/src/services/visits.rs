//! Visited-set resolution and the country-add controller.

use std::collections::BTreeSet;

use entities::Country;
use visit_store::{Constraint, StoreError, VisitStore};

use super::{TrackerError, TrackerResult};

/// Loads the country codes visited by a user.
///
/// A user without marks yields an empty set.
pub async fn load_visited<S: VisitStore + ?Sized>(
    store: &S,
    user_id: i64,
) -> TrackerResult<BTreeSet<String>> {
    Ok(store.list_visited(user_id).await?)
}

/// Picks the catalog entry for `input` among substring candidates.
///
/// An exact (case-insensitive) name match wins; otherwise the first
/// candidate, which the store orders by code.
fn pick_candidate(candidates: Vec<Country>, input: &str) -> Option<Country> {
    let exact = candidates.iter().position(|c| c.name_matches(input));
    let index = exact.unwrap_or(0);
    candidates.into_iter().nth(index)
}

/// Resolves free-text input against the catalog and records a visit.
///
/// The catalog lookup is advisory: the per-user uniqueness constraint is
/// what rejects a second mark, including one racing this call.
pub async fn add_country<S: VisitStore + ?Sized>(
    store: &S,
    user_id: i64,
    input: &str,
) -> TrackerResult<Country> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TrackerError::validation("Please enter country name"));
    }

    let fragment = input.to_lowercase();
    let candidates = store.search_countries(&fragment).await?;
    if candidates.len() > 1 {
        tracing::debug!(input, matches = candidates.len(), "Ambiguous country input");
    }
    let country = pick_candidate(candidates, input)
        .ok_or_else(|| TrackerError::not_found("Country does not exist, try again"))?;

    match store.add_visit(user_id, &country.code).await {
        Ok(()) => {
            tracing::info!(user_id, code = %country.code, "Country added");
            Ok(country)
        }
        Err(StoreError::ConstraintViolation {
            constraint: Constraint::UniqueVisit,
        }) => Err(TrackerError::duplicate(
            "Country has already been added, try again",
        )),
        Err(err) => {
            tracing::warn!(user_id, code = %country.code, error = %err, "Failed to add country");
            Err(err.into())
        }
    }
}
