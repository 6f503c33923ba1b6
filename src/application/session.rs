//! The owned selection session.
//!
//! Every mutation of the [`Selection`] goes through [`Session`], which
//! re-evaluates fetch gating right away and returns whatever requests the
//! change calls for.

use tracing::{info, warn};

use crate::domain::{
    FetchCascade, FetchCompletion, FetchRequest, Level, LevelResult, LevelStatus, LevelView,
    Selection, SelectionError,
};

/// A selection together with the fetch state derived from it.
///
/// # Examples
///
/// ```
/// use locsel::application::Session;
/// use locsel::domain::LevelKey;
///
/// let (mut session, requests) = Session::start();
/// assert_eq!(requests[0].key, LevelKey::Countries);
///
/// let requests = session.set_country("India");
/// assert_eq!(requests[0].key, LevelKey::States { country: "India".to_string() });
/// ```
#[derive(Debug)]
pub struct Session {
    selection: Selection,
    cascade: FetchCascade,
}

impl Session {
    /// Opens a session with an empty selection. The returned requests hold
    /// the one countries fetch of the session.
    pub fn start() -> (Self, Vec<FetchRequest>) {
        let mut session = Self {
            selection: Selection::default(),
            cascade: FetchCascade::new(),
        };
        let requests = session.cascade.sync(&session.selection);
        info!("location session started");
        (session, requests)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_country(&mut self, value: impl Into<String>) -> Vec<FetchRequest> {
        self.selection.set_country(value);
        self.cascade.sync(&self.selection)
    }

    pub fn set_state(&mut self, value: impl Into<String>) -> Result<Vec<FetchRequest>, SelectionError> {
        self.selection.set_state(value).inspect_err(|err| warn!(%err, "state rejected"))?;
        Ok(self.cascade.sync(&self.selection))
    }

    pub fn set_city(&mut self, value: impl Into<String>) -> Result<Vec<FetchRequest>, SelectionError> {
        self.selection.set_city(value).inspect_err(|err| warn!(%err, "city rejected"))?;
        Ok(self.cascade.sync(&self.selection))
    }

    /// Sets the value for `level` through the matching setter.
    pub fn select(&mut self, level: Level, value: impl Into<String>) -> Result<Vec<FetchRequest>, SelectionError> {
        match level {
            Level::Country => Ok(self.set_country(value)),
            Level::State => self.set_state(value),
            Level::City => self.set_city(value),
        }
    }

    pub fn complete(&mut self, completion: FetchCompletion) -> bool {
        self.cascade.complete(completion)
    }

    pub fn retry(&mut self, level: Level) -> Option<FetchRequest> {
        self.cascade.retry(level)
    }

    pub fn result(&self, level: Level) -> &LevelResult {
        self.cascade.result(level)
    }

    pub fn view(&self, level: Level) -> LevelView<'_> {
        self.result(level).view()
    }

    /// Whether the user may pick a value at `level` right now.
    pub fn is_interactive(&self, level: Level) -> bool {
        let unlocked = level
            .parent()
            .is_none_or(|parent| !self.selection.get(parent).is_empty());
        unlocked && self.result(level).status != LevelStatus::Loading
    }

    pub fn is_complete(&self) -> bool {
        self.selection.is_complete()
    }

    pub fn summary(&self) -> Option<String> {
        self.selection.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lookup::fake::*;
    use crate::domain::{LevelKey, LocationLookup, LookupFailure};

    /// Runs every request synchronously against `lookup`.
    fn settle(session: &mut Session, requests: Vec<FetchRequest>, lookup: &dyn LocationLookup) {
        for request in requests {
            let completion = request.run(lookup);
            session.complete(completion);
        }
    }

    #[test]
    fn test_start_requests_countries() {
        let (session, requests) = Session::start();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].key, LevelKey::Countries);
        assert_eq!(session.view(Level::Country), LevelView::Loading);
        assert!(!session.is_interactive(Level::Country));
        assert_eq!(session.view(Level::State), LevelView::Disabled);
        assert_eq!(session.view(Level::City), LevelView::Disabled);
    }

    #[test]
    fn test_full_selection_walkthrough() {
        let lookup = india_directory();
        let (mut session, requests) = Session::start();
        settle(&mut session, requests, &lookup);
        assert!(session.is_interactive(Level::Country));
        assert!(!session.is_interactive(Level::State));

        let requests = session.set_country("India");
        settle(&mut session, requests, &lookup);
        assert_eq!(
            session.view(Level::State),
            LevelView::Options(&names(&["Maharashtra", "Karnataka"]))
        );

        let requests = session.set_state("Maharashtra").unwrap();
        settle(&mut session, requests, &lookup);
        assert_eq!(session.view(Level::City), LevelView::Options(&names(&["Pune", "Mumbai"])));

        let requests = session.set_city("Pune").unwrap();
        assert!(requests.is_empty());
        assert!(session.is_complete());
        assert_eq!(session.summary().as_deref(), Some("Pune, Maharashtra, India"));
        assert_eq!(
            lookup.calls(),
            vec![LevelKey::Countries, states("India"), cities("India", "Maharashtra")]
        );
    }

    #[test]
    fn test_states_failure_keeps_country() {
        let lookup = FakeLookup::new()
            .with(LevelKey::Countries, Ok(names(&["India"])))
            .with(states("India"), Err(LookupFailure::Transport("reset by peer".to_string())));
        let (mut session, requests) = Session::start();
        settle(&mut session, requests, &lookup);

        let requests = session.set_country("India");
        settle(&mut session, requests, &lookup);

        assert_eq!(session.selection().country(), "India");
        assert_eq!(session.result(Level::State).status, LevelStatus::Error);
        assert_eq!(
            session.view(Level::State),
            LevelView::Unavailable { reason: Some("request failed: reset by peer") }
        );
        assert_eq!(session.view(Level::City), LevelView::Disabled);
        assert!(session.is_interactive(Level::State));
    }

    #[test]
    fn test_empty_city_list_is_unavailable() {
        let lookup = india_directory();
        let (mut session, requests) = Session::start();
        settle(&mut session, requests, &lookup);
        let requests = session.set_country("India");
        settle(&mut session, requests, &lookup);
        let requests = session.set_state("Karnataka").unwrap();
        settle(&mut session, requests, &lookup);

        assert_eq!(session.view(Level::City), LevelView::Unavailable { reason: None });
    }

    #[test]
    fn test_changing_country_before_states_arrive() {
        let lookup = india_directory();
        let (mut session, requests) = Session::start();
        settle(&mut session, requests, &lookup);

        let india = session.set_country("India");
        let usa = session.set_country("USA");

        settle(&mut session, india, &lookup);
        assert_eq!(session.view(Level::State), LevelView::Loading);

        settle(&mut session, usa, &lookup);
        assert_eq!(session.view(Level::State), LevelView::Options(&names(&["California", "Texas"])));
    }

    #[test]
    fn test_reselecting_same_country_clears_below() {
        let lookup = india_directory();
        let (mut session, requests) = Session::start();
        settle(&mut session, requests, &lookup);
        let requests = session.set_country("India");
        settle(&mut session, requests, &lookup);
        let requests = session.set_state("Maharashtra").unwrap();
        settle(&mut session, requests, &lookup);
        session.set_city("Pune").unwrap();

        let requests = session.set_country("India");
        assert!(requests.is_empty(), "memoized states are reused");
        assert_eq!(session.selection().state(), "");
        assert_eq!(session.selection().city(), "");
        assert_eq!(session.view(Level::City), LevelView::Disabled);
    }

    #[test]
    fn test_select_rejects_out_of_order_values() {
        let (mut session, _) = Session::start();
        assert_eq!(
            session.select(Level::State, "Maharashtra"),
            Err(SelectionError::CountryRequired)
        );
        assert_eq!(session.select(Level::City, "Pune"), Err(SelectionError::StateRequired));
        assert_eq!(session.selection(), &Selection::default());
    }

    #[test]
    fn test_retry_after_failure() {
        let failing = FakeLookup::new();
        let (mut session, requests) = Session::start();
        settle(&mut session, requests, &failing);
        assert_eq!(session.result(Level::Country).status, LevelStatus::Error);

        let request = session.retry(Level::Country).expect("retry issued");
        settle(&mut session, vec![request], &india_directory());
        assert_eq!(session.view(Level::Country), LevelView::Options(&names(&["India", "USA"])));
    }
}
