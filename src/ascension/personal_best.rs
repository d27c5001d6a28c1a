//! Reduces a player's ascension history to one best run per category.

use super::{classify, Category, Mode, RunRecord};
use crate::error::ClassifyError;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Inclusive bounds on which runs count. `starts` limits the start date,
/// `ends` limits the end date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub starts: Option<NaiveDate>,
    pub ends: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(starts: Option<NaiveDate>, ends: Option<NaiveDate>) -> DateWindow {
        DateWindow { starts, ends }
    }

    pub fn admits(&self, run: &RunRecord) -> bool {
        if let Some(starts) = self.starts {
            if run.start < starts {
                return false;
            }
        }
        if let Some(ends) = self.ends {
            if run.end > ends {
                return false;
            }
        }
        true
    }
}

/// True when `candidate` beats `best`: fewer days, or the same days in
/// fewer turns. An exact tie is not an improvement.
pub fn is_better(candidate: &RunRecord, best: &RunRecord) -> bool {
    (candidate.days, candidate.turns) < (best.days, best.turns)
}

/// Fastest run per category among the non-casual runs inside `window`.
///
/// Fails on the first run whose path can't be classified.
pub fn reduce_bests(
    history: &[RunRecord],
    window: &DateWindow,
) -> Result<BTreeMap<Category, RunRecord>, ClassifyError> {
    history
        .iter()
        .filter(|run| run.mode != Mode::Casual && window.admits(run))
        .try_fold(BTreeMap::new(), |mut bests, run| -> Result<_, ClassifyError> {
            let category = classify(run.mode, &run.path)?;
            let replace = bests
                .get(&category)
                .map_or(true, |best| is_better(run, best));
            if replace {
                bests.insert(category, run.clone());
            }
            Ok(bests)
        })
}
