use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tally_shared::models::{OptionTally, RoundId};
use tally_shared::tally::{RoundTally, TallyError};
use thiserror::Error;
use tracing::debug;

use crate::config::Settings;
use crate::queries::Queries;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Inconsistent records: {0}")]
    Inconsistent(#[from] TallyError),
}

/// Read side the HTTP layer depends on.
#[rocket::async_trait]
pub trait ResultsStore: Send + Sync {
    /// Every option of `round` with its vote count, highest first.
    async fn round_results(&self, round: &RoundId) -> Result<Vec<OptionTally>, StoreError>;
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Builds the pool without opening a connection; an unreachable database
    /// shows up as a per-request failure rather than a startup one.
    pub fn connect_lazy(settings: &Settings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_lazy(&settings.database_url)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[rocket::async_trait]
impl ResultsStore for PgStore {
    async fn round_results(&self, round: &RoundId) -> Result<Vec<OptionTally>, StoreError> {
        let rows = Queries::round_results(&self.pool, round).await?;
        debug!(round_id = %round, rows = rows.len(), "Fetched round results");
        Ok(rows)
    }
}

#[derive(Debug)]
struct OptionRecord {
    id: String,
    round_id: String,
    label: String,
}

#[derive(Debug, Default)]
struct Records {
    options: Vec<OptionRecord>,
    votes: Vec<String>,
}

/// In-process store with the same semantics as the results query.
/// Can be switched unavailable to stand in for a database outage.
#[derive(Debug)]
pub struct MemoryStore {
    records: Mutex<Records>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            records: Mutex::new(Records::default()),
            available: AtomicBool::new(true),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_option(&self, round_id: &str, option_id: &str, label: &str) -> Result<(), StoreError> {
        let mut records = self.lock()?;
        if records.options.iter().any(|o| o.id == option_id) {
            return Err(TallyError::DuplicateOption(option_id.to_owned()).into());
        }
        records.options.push(OptionRecord {
            id: option_id.to_owned(),
            round_id: round_id.to_owned(),
            label: label.to_owned(),
        });
        Ok(())
    }

    pub fn add_vote(&self, option_id: &str) -> Result<(), StoreError> {
        let mut records = self.lock()?;
        if !records.options.iter().any(|o| o.id == option_id) {
            return Err(TallyError::UnknownOption(option_id.to_owned()).into());
        }
        records.votes.push(option_id.to_owned());
        Ok(())
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Records>, StoreError> {
        self.records
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }
}

#[rocket::async_trait]
impl ResultsStore for MemoryStore {
    async fn round_results(&self, round: &RoundId) -> Result<Vec<OptionTally>, StoreError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }

        let records = self.lock()?;
        let mut tally = RoundTally::new();
        let mut in_round = HashSet::new();
        for option in records.options.iter().filter(|o| o.round_id == round.as_str()) {
            tally.add_option(option.id.as_str(), option.label.as_str())?;
            in_round.insert(option.id.as_str());
        }
        for vote in records.votes.iter().filter(|v| in_round.contains(v.as_str())) {
            tally.record_vote(vote)?;
        }
        Ok(tally.into_ranked())
    }
}
