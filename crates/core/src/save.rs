//! Full-replace save of one week's report items.
//!
//! A save never merges: after it is applied, the week holds exactly the
//! submitted items. Stores that can run a transaction get the [`Atomic`]
//! strategy. Others fall back to [`SequentialBestEffort`], which may leave
//! the week with only the deletion applied; [`SaveOutcome`] reports that
//! case instead of hiding it.
//!
//! [`Atomic`]: SaveStrategy::Atomic
//! [`SequentialBestEffort`]: SaveStrategy::SequentialBestEffort

use chrono::{Duration, NaiveDate, Utc};

use crate::report::{ReportItem, ReportItemInput};
use crate::store::ReportStore;

/// How the delete + insert pair of a save is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStrategy {
    /// One transaction: the week is fully replaced or untouched.
    Atomic,
    /// Delete, then insert row by row. A failure midway is reported, not
    /// rolled back.
    SequentialBestEffort,
}

impl SaveStrategy {
    /// Pick the strategy a store is capable of.
    pub fn for_store<S: ReportStore + ?Sized>(store: &S) -> Self {
        if store.supports_transactions() {
            Self::Atomic
        } else {
            Self::SequentialBestEffort
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Atomic => "atomic",
            Self::SequentialBestEffort => "sequential-best-effort",
        }
    }
}

/// Result of a save, distinguishing the partially-applied state that only
/// the sequential strategy can produce.
#[derive(Debug)]
pub enum SaveOutcome<E> {
    /// The week now holds exactly the submitted items.
    Applied { strategy: SaveStrategy, written: u64 },
    /// The old rows were deleted but only `written` of `attempted` new rows
    /// were inserted.
    PartiallyApplied {
        deleted: u64,
        written: u64,
        attempted: u64,
        error: E,
    },
    /// Nothing changed in the store.
    NotApplied { strategy: SaveStrategy, error: E },
}

impl<E> SaveOutcome<E> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Replace everything stored for `week_start` with `inputs`.
///
/// Items without an id get a fresh one; ids that are present are kept so
/// previously saved rows keep their identity. Each item is stamped one
/// microsecond after the previous one, so `created_at` alone records the
/// submitted order and it survives a backup round trip.
pub async fn save_week<S>(
    store: &S,
    week_start: NaiveDate,
    inputs: Vec<ReportItemInput>,
) -> SaveOutcome<S::Error>
where
    S: ReportStore + ?Sized,
{
    let now = Utc::now();
    let items: Vec<ReportItem> = inputs
        .into_iter()
        .zip(0..)
        .map(|(input, i)| input.into_item(week_start, now + Duration::microseconds(i)))
        .collect();

    let strategy = SaveStrategy::for_store(store);
    let outcome = match strategy {
        SaveStrategy::Atomic => save_atomic(store, week_start, &items).await,
        SaveStrategy::SequentialBestEffort => save_sequential(store, week_start, &items).await,
    };

    match &outcome {
        SaveOutcome::Applied { written, .. } => {
            tracing::info!(%week_start, strategy = strategy.as_str(), written, "Week saved");
        }
        SaveOutcome::PartiallyApplied {
            deleted,
            written,
            attempted,
            error,
        } => {
            tracing::error!(
                %week_start,
                deleted,
                written,
                attempted,
                error = %error,
                "Week save partially applied",
            );
        }
        SaveOutcome::NotApplied { error, .. } => {
            tracing::error!(
                %week_start,
                strategy = strategy.as_str(),
                error = %error,
                "Week save failed",
            );
        }
    }

    outcome
}

async fn save_atomic<S>(
    store: &S,
    week_start: NaiveDate,
    items: &[ReportItem],
) -> SaveOutcome<S::Error>
where
    S: ReportStore + ?Sized,
{
    match store.replace_week_atomic(week_start, items).await {
        Ok(written) => SaveOutcome::Applied {
            strategy: SaveStrategy::Atomic,
            written,
        },
        Err(error) => SaveOutcome::NotApplied {
            strategy: SaveStrategy::Atomic,
            error,
        },
    }
}

async fn save_sequential<S>(
    store: &S,
    week_start: NaiveDate,
    items: &[ReportItem],
) -> SaveOutcome<S::Error>
where
    S: ReportStore + ?Sized,
{
    let strategy = SaveStrategy::SequentialBestEffort;
    let deleted = match store.delete_week(week_start).await {
        Ok(n) => n,
        Err(error) => return SaveOutcome::NotApplied { strategy, error },
    };

    let attempted = items.len() as u64;
    let mut written = 0u64;
    for item in items {
        if let Err(error) = store.insert_item(item).await {
            if deleted == 0 && written == 0 {
                return SaveOutcome::NotApplied { strategy, error };
            }
            return SaveOutcome::PartiallyApplied {
                deleted,
                written,
                attempted,
                error,
            };
        }
        written += 1;
    }

    SaveOutcome::Applied { strategy, written }
}
