//! Dependency-gated fetching for the three selection levels.
//!
//! The cascade never performs I/O itself. [`FetchCascade::sync`] looks at the
//! current [`Selection`] and hands back the [`FetchRequest`]s that need to go
//! out; whoever runs them feeds the outcome back through
//! [`FetchCascade::complete`]. Results are memoized per [`LevelKey`] for the
//! whole session, and a result only lands if its key still governs its level
//! when it arrives.

use std::collections::HashMap;
use tracing::{debug, warn};

use super::errors::LookupResult;
use super::lookup::LocationLookup;
use super::models::{Level, LevelKey, LevelResult, LevelStatus, Selection, Ticket};

static IDLE: LevelResult = LevelResult::IDLE;

/// A fetch the driver must issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub key: LevelKey,
    pub ticket: Ticket,
}

impl FetchRequest {
    /// Performs the lookup and packages the outcome for [`FetchCascade::complete`].
    pub fn run(self, lookup: &dyn LocationLookup) -> FetchCompletion {
        let outcome = self.key.fetch(lookup);
        FetchCompletion {
            key: self.key,
            ticket: self.ticket,
            outcome,
        }
    }
}

/// The outcome of a [`FetchRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCompletion {
    pub key: LevelKey,
    pub ticket: Ticket,
    pub outcome: LookupResult<Vec<String>>,
}

#[derive(Debug)]
struct Entry {
    ticket: Ticket,
    result: LevelResult,
}

/// Per-session fetch state for the country, state and city levels.
#[derive(Debug, Default)]
pub struct FetchCascade {
    entries: HashMap<LevelKey, Entry>,
    governing: [Option<LevelKey>; 3],
    next_ticket: u64,
}

impl FetchCascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluates gating for every level against `selection`.
    ///
    /// Returns the requests that must be issued. A key that already has a
    /// result, or a request in flight, produces nothing.
    pub fn sync(&mut self, selection: &Selection) -> Vec<FetchRequest> {
        let mut requests = Vec::new();
        for level in Level::ALL {
            let key = LevelKey::governing(level, selection);
            if let Some(key) = &key {
                if !self.entries.contains_key(key) {
                    requests.push(self.issue(key.clone()));
                }
            }
            self.governing[level.index()] = key;
        }
        requests
    }

    /// Applies the outcome of a request. Returns `true` when it was applied.
    ///
    /// Completions for a key that no longer governs its level are dropped and
    /// their pending entry is evicted, so selecting that key again starts a
    /// fresh request. Completions whose ticket was superseded are ignored.
    pub fn complete(&mut self, completion: FetchCompletion) -> bool {
        let FetchCompletion { key, ticket, outcome } = completion;

        let pending = matches!(
            self.entries.get(&key),
            Some(entry) if entry.ticket == ticket && entry.result.status == LevelStatus::Loading
        );
        if !pending {
            debug!(%key, %ticket, "ignoring superseded completion");
            return false;
        }

        if self.governing[key.level().index()].as_ref() != Some(&key) {
            debug!(%key, %ticket, "discarding stale completion");
            self.entries.remove(&key);
            return false;
        }

        let result = match outcome {
            Ok(options) => {
                debug!(%key, %ticket, count = options.len(), "fetch succeeded");
                LevelResult::success(options)
            }
            Err(failure) => {
                warn!(%key, %ticket, error = %failure, "fetch failed");
                LevelResult::failed(failure.to_string())
            }
        };
        self.entries.insert(key, Entry { ticket, result });
        true
    }

    /// Re-issues the fetch for an enabled level whose result is terminal.
    ///
    /// Returns `None` when the level is gated off or still loading.
    pub fn retry(&mut self, level: Level) -> Option<FetchRequest> {
        let key = self.governing[level.index()].clone()?;
        let terminal = self
            .entries
            .get(&key)
            .is_none_or(|entry| entry.result.status.is_terminal());
        if !terminal {
            return None;
        }
        debug!(%key, "retrying");
        Some(self.issue(key))
    }

    /// The current result for `level`; idle while the level is gated off.
    pub fn result(&self, level: Level) -> &LevelResult {
        self.governing[level.index()]
            .as_ref()
            .and_then(|key| self.entries.get(key))
            .map(|entry| &entry.result)
            .unwrap_or(&IDLE)
    }

    /// The key currently governing `level`, if the level is enabled.
    pub fn governing_key(&self, level: Level) -> Option<&LevelKey> {
        self.governing[level.index()].as_ref()
    }

    fn issue(&mut self, key: LevelKey) -> FetchRequest {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        debug!(%key, %ticket, "issuing fetch");
        self.entries.insert(
            key.clone(),
            Entry {
                ticket,
                result: LevelResult::loading(),
            },
        );
        FetchRequest { key, ticket }
    }
}
