#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tokio::sync::Notify;

use coinrates_backend::db::{JournalError, RateJournal};
use coinrates_backend::external::rate_provider::{ProviderError, RateProvider};
use coinrates_backend::models::{Rate, RateStats};

pub fn rate(title: &str, cost: f64, inserted: DateTime<Utc>) -> Rate {
    Rate {
        title: title.to_string(),
        cost,
        inserted,
    }
}

/// In-memory journal with the same windowing semantics as the Postgres
/// implementation (UTC stands in for the store-local day boundary).
#[derive(Default)]
pub struct MemoryJournal {
    rows: Mutex<Vec<Rate>>,
    failing_titles: Mutex<Vec<String>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, rates: Vec<Rate>) {
        self.rows.lock().unwrap().extend(rates);
    }

    /// The next append for `title` fails once, as a crashed write would.
    pub fn fail_next_append_for(&self, title: &str) {
        self.failing_titles.lock().unwrap().push(title.to_string());
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl RateJournal for MemoryJournal {
    async fn append(&self, rate: &Rate) -> Result<(), JournalError> {
        {
            let mut failing = self.failing_titles.lock().unwrap();
            if let Some(pos) = failing.iter().position(|t| t == &rate.title) {
                failing.remove(pos);
                return Err(JournalError::Backend("injected append failure".into()));
            }
        }

        self.rows.lock().unwrap().push(rate.clone());
        Ok(())
    }

    async fn latest(&self, title: &str) -> Result<Option<Rate>, JournalError> {
        let cutoff = Utc::now() - ChronoDuration::hours(1);
        let rows = self.rows.lock().unwrap();

        Ok(rows
            .iter()
            .filter(|r| r.title == title && r.inserted >= cutoff)
            .max_by_key(|r| r.inserted)
            .cloned())
    }

    async fn list_latest(&self) -> Result<Vec<Rate>, JournalError> {
        let cutoff = Utc::now() - ChronoDuration::hours(1);
        let rows = self.rows.lock().unwrap();

        let mut by_title: HashMap<&str, &Rate> = HashMap::new();
        for r in rows.iter().filter(|r| r.inserted >= cutoff) {
            let entry = by_title.entry(r.title.as_str()).or_insert(r);
            if r.inserted > entry.inserted {
                *entry = r;
            }
        }

        Ok(by_title.values().map(|r| (*r).clone()).collect())
    }

    async fn stats(&self, title: &str) -> Result<Option<RateStats>, JournalError> {
        let now = Utc::now();
        let today = now.date_naive();
        let hour_cutoff = now - ChronoDuration::hours(1);
        let rows = self.rows.lock().unwrap();

        let daily: Vec<f64> = rows
            .iter()
            .filter(|r| r.title == title && r.inserted.date_naive() == today)
            .map(|r| r.cost)
            .collect();
        let hourly: Vec<f64> = rows
            .iter()
            .filter(|r| r.title == title && r.inserted >= hour_cutoff)
            .map(|r| r.cost)
            .collect();

        if daily.is_empty() || hourly.is_empty() {
            return Ok(None);
        }

        let min_hour = hourly.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_hour = hourly.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if min_hour == 0.0 {
            return Err(JournalError::Backend(
                "division by zero in percent change".into(),
            ));
        }

        Ok(Some(RateStats {
            max_cost_per_day: daily.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            min_cost_per_day: daily.iter().cloned().fold(f64::INFINITY, f64::min),
            change_per_hour_percents: (max_hour - min_hour) / min_hour * 100.0,
        }))
    }
}

/// Provider double that replays a fixed script of snapshots; once the
/// script is exhausted it serves empty snapshots.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<Vec<Rate>, ProviderError>>>,
    calls: AtomicUsize,
    gated: AtomicBool,
    gate: Notify,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Result<Vec<Rate>, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
            gated: AtomicBool::new(false),
            gate: Notify::new(),
        }
    }

    /// Makes every fetch block until `release` is called, so a test can
    /// hold a poll in flight.
    pub fn gated(self) -> Self {
        self.gated.store(true, Ordering::SeqCst);
        self
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateProvider for ScriptedProvider {
    async fn fetch_rates(&self) -> Result<Vec<Rate>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.gated.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
