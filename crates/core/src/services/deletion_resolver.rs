use tracing::debug;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::query::TransactionQuery;
use crate::models::series::SeriesInfo;
use crate::models::settings::SERIES_LEN_CEILING;
use crate::models::transaction::Transaction;
use crate::storage::traits::Store;

use super::{series_encoder, series_identifier};

/// Records chosen for removal.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionPlan {
    /// Always contains the target, first.
    pub ids: Vec<Uuid>,
    /// `None` when the target carries no series tag.
    pub series: Option<SeriesInfo>,
}

impl DeletionPlan {
    fn single(target: &Transaction) -> Self {
        Self {
            ids: vec![target.id],
            series: None,
        }
    }
}

/// Works out which stored records a "this and all future ones" delete covers.
///
/// Series membership is recovered from description text only:
/// 1. classify the target; untagged targets resolve to themselves,
/// 2. range-query the user's descriptions between the tag opening
///    (`"{base} ("` / `"{base} (Mês "`) and the three-digit ceiling tag,
/// 3. keep records that re-parse, with the same tag shape, to exactly the
///    same base and a position `>=` the target's.
///
/// The range is a coarse pre-filter: `"10/12"` sorts before `"2/12"`, and
/// `"Curso (1) (2/3)"` falls inside `"Curso ("`. Step 3 is authoritative.
/// Records from a different series with identical base text are included.
pub struct SeriesDeletionResolver;

impl SeriesDeletionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Inclusive description bounds for every tag of this series' shape.
    pub fn description_range(info: &SeriesInfo) -> (String, String) {
        let opening = series_encoder::tag_opening(info.kind, &info.base);
        let ceiling = format!("{opening}{SERIES_LEN_CEILING}/{SERIES_LEN_CEILING})");
        (opening, ceiling)
    }

    /// Resolve a "future" delete of `target` against the store.
    pub async fn resolve_future(
        &self,
        store: &dyn Store,
        user_id: &str,
        target: &Transaction,
    ) -> Result<DeletionPlan, CoreError> {
        let Some(info) = series_identifier::classify(&target.description) else {
            debug!(id = %target.id, "target has no series tag, deleting it alone");
            return Ok(DeletionPlan::single(target));
        };

        let (from, to) = Self::description_range(&info);
        debug!(base = %info.base, position = info.position, %from, %to, "querying series range");
        let query = TransactionQuery::new().description_between(from, to);
        let candidates = store.query_transactions(user_id, &query).await?;

        let ids = Self::select_future(&info, target, &candidates);
        debug!(
            candidates = candidates.len(),
            selected = ids.len(),
            "resolved future deletion"
        );
        Ok(DeletionPlan {
            ids,
            series: Some(info),
        })
    }

    /// Step 3 on an already-fetched candidate list. The target comes first and
    /// is present even when no candidate qualifies.
    pub fn select_future(
        info: &SeriesInfo,
        target: &Transaction,
        candidates: &[Transaction],
    ) -> Vec<Uuid> {
        let mut ids = vec![target.id];
        for candidate in candidates {
            if candidate.id == target.id {
                continue;
            }
            let later = series_identifier::classify(&candidate.description).is_some_and(|c| {
                c.kind == info.kind && c.base == info.base && c.position >= info.position
            });
            if later {
                ids.push(candidate.id);
            }
        }
        ids
    }
}

impl Default for SeriesDeletionResolver {
    fn default() -> Self {
        Self::new()
    }
}
