use std::collections::HashMap;
use thiserror::Error;

use crate::models::OptionTally;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TallyError {
    #[error("Duplicate option: {0}")] DuplicateOption(String),
    #[error("Unknown option: {0}")] UnknownOption(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TalliedOption {
    label: String,
    votes: i64,
    order: usize,
}

/// Per-option vote counts for a single round, built in memory.
///
/// Mirrors the results query: every added option shows up in the output,
/// options nobody voted for report zero.
#[derive(Debug, Default, Clone)]
pub struct RoundTally {
    options: HashMap<String, TalliedOption>,
}

impl RoundTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_option(
        &mut self,
        option_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<(), TallyError> {
        let option_id = option_id.into();
        if self.options.contains_key(&option_id) {
            return Err(TallyError::DuplicateOption(option_id));
        }
        let order = self.options.len();
        self.options.insert(option_id, TalliedOption { label: label.into(), votes: 0, order });
        Ok(())
    }

    pub fn record_vote(&mut self, option_id: &str) -> Result<(), TallyError> {
        self.options
            .get_mut(option_id)
            .map(|option| option.votes += 1)
            .ok_or_else(|| TallyError::UnknownOption(option_id.to_owned()))
    }

    pub fn len(&self) -> usize { self.options.len() }

    pub fn is_empty(&self) -> bool { self.options.is_empty() }

    pub fn total_votes(&self) -> i64 {
        self.options.values().map(|o| o.votes).sum()
    }

    /// Consumes the tally, returning rows highest count first. Options with
    /// equal counts keep the order they were added in.
    pub fn into_ranked(self) -> Vec<OptionTally> {
        let mut entries: Vec<_> = self.options.into_iter().collect();
        entries.sort_by_key(|(_, option)| option.order);
        rank(
            entries
                .into_iter()
                .map(|(id, option)| OptionTally::new(id, option.label, option.votes))
                .collect(),
        )
    }
}

/// Stable sort by descending vote count.
pub fn rank(mut tallies: Vec<OptionTally>) -> Vec<OptionTally> {
    tallies.sort_by(|a, b| b.votes.cmp(&a.votes));
    tallies
}

pub fn is_ranked(tallies: &[OptionTally]) -> bool {
    tallies.windows(2).all(|pair| pair[0].votes >= pair[1].votes)
}
