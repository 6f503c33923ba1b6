use std::fmt;
use serde::{Deserialize, Serialize};

use super::errors::SelectionError;

/// The current country, state and city picks.
///
/// An empty string means nothing is selected at that level. The fields are
/// only reachable through the setters, which keep the ordering invariant:
/// a state is never set without a country, and a city never without a state.
///
/// # Examples
///
/// ```
/// use locsel::domain::Selection;
///
/// let mut selection = Selection::default();
/// selection.set_country("India");
/// selection.set_state("Maharashtra").unwrap();
/// selection.set_city("Pune").unwrap();
/// assert_eq!(selection.summary().as_deref(), Some("Pune, Maharashtra, India"));
///
/// selection.set_country("India");
/// assert_eq!(selection.state(), "");
/// assert_eq!(selection.city(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectionParts")]
pub struct Selection {
    country: String,
    state: String,
    city: String,
}

#[derive(Deserialize)]
struct SelectionParts {
    #[serde(default)]
    country: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    city: String,
}

impl TryFrom<SelectionParts> for Selection {
    type Error = SelectionError;

    fn try_from(parts: SelectionParts) -> Result<Self, Self::Error> {
        let mut selection = Selection::default();
        selection.set_country(parts.country);
        selection.set_state(parts.state)?;
        selection.set_city(parts.city)?;
        Ok(selection)
    }
}

impl Selection {
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the selected value for `level` (empty when unset).
    pub fn get(&self, level: Level) -> &str {
        match level {
            Level::Country => &self.country,
            Level::State => &self.state,
            Level::City => &self.city,
        }
    }

    /// Sets the country and clears state and city.
    ///
    /// The reset happens even when `value` equals the current country: every
    /// country pick counts as a change.
    pub fn set_country(&mut self, value: impl Into<String>) {
        self.country = value.into();
        self.state.clear();
        self.city.clear();
    }

    /// Sets the state and clears the city.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::CountryRequired`] when `value` is non-empty and
    /// no country is selected. The selection is left unchanged in that case.
    pub fn set_state(&mut self, value: impl Into<String>) -> Result<(), SelectionError> {
        let value = value.into();
        if !value.is_empty() && self.country.is_empty() {
            return Err(SelectionError::CountryRequired);
        }
        self.state = value;
        self.city.clear();
        Ok(())
    }

    /// Sets the city. The city is the leaf, so nothing else is reset.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::StateRequired`] when `value` is non-empty and
    /// no state is selected.
    pub fn set_city(&mut self, value: impl Into<String>) -> Result<(), SelectionError> {
        let value = value.into();
        if !value.is_empty() && self.state.is_empty() {
            return Err(SelectionError::StateRequired);
        }
        self.city = value;
        Ok(())
    }

    /// True once country, state and city are all selected.
    pub fn is_complete(&self) -> bool {
        !self.country.is_empty() && !self.state.is_empty() && !self.city.is_empty()
    }

    /// The confirmation line, e.g. `"Pune, Maharashtra, India"`.
    pub fn summary(&self) -> Option<String> {
        self.is_complete()
            .then(|| format!("{}, {}, {}", self.city, self.state, self.country))
    }
}

/// One of the three hierarchical selection stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Country,
    State,
    City,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Country, Level::State, Level::City];

    /// Position of the level in [`Level::ALL`].
    pub fn index(self) -> usize {
        match self {
            Level::Country => 0,
            Level::State => 1,
            Level::City => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Country => "Country",
            Level::State => "State",
            Level::City => "City",
        }
    }

    /// The level whose selection gates this one.
    pub fn parent(self) -> Option<Level> {
        match self {
            Level::Country => None,
            Level::State => Some(Level::Country),
            Level::City => Some(Level::State),
        }
    }

    pub fn next(self) -> Level {
        match self {
            Level::Country => Level::State,
            Level::State => Level::City,
            Level::City => Level::Country,
        }
    }

    pub fn previous(self) -> Level {
        match self {
            Level::Country => Level::City,
            Level::State => Level::Country,
            Level::City => Level::State,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one logical fetch. Equal keys are the same request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LevelKey {
    Countries,
    States { country: String },
    Cities { country: String, state: String },
}

impl LevelKey {
    /// The key that governs `level` for the given selection, or `None` when
    /// the level is gated off because a parent selection is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use locsel::domain::{Level, LevelKey, Selection};
    ///
    /// let mut selection = Selection::default();
    /// assert_eq!(LevelKey::governing(Level::Country, &selection), Some(LevelKey::Countries));
    /// assert_eq!(LevelKey::governing(Level::State, &selection), None);
    ///
    /// selection.set_country("India");
    /// assert_eq!(
    ///     LevelKey::governing(Level::State, &selection),
    ///     Some(LevelKey::States { country: "India".to_string() })
    /// );
    /// ```
    pub fn governing(level: Level, selection: &Selection) -> Option<LevelKey> {
        match level {
            Level::Country => Some(LevelKey::Countries),
            Level::State if !selection.country().is_empty() => Some(LevelKey::States {
                country: selection.country().to_string(),
            }),
            Level::City if !selection.country().is_empty() && !selection.state().is_empty() => {
                Some(LevelKey::Cities {
                    country: selection.country().to_string(),
                    state: selection.state().to_string(),
                })
            }
            _ => None,
        }
    }

    pub fn level(&self) -> Level {
        match self {
            LevelKey::Countries => Level::Country,
            LevelKey::States { .. } => Level::State,
            LevelKey::Cities { .. } => Level::City,
        }
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelKey::Countries => write!(f, "countries"),
            LevelKey::States { country } => write!(f, "states/{}", country),
            LevelKey::Cities { country, state } => write!(f, "cities/{}/{}", country, state),
        }
    }
}

/// Identifies one issued request. A retry of the same key gets a new ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Idle,
    Loading,
    Success,
    Error,
}

impl LevelStatus {
    /// `success` and `error` are terminal; they are reused until retried.
    pub fn is_terminal(self) -> bool {
        matches!(self, LevelStatus::Success | LevelStatus::Error)
    }
}

/// Outcome of the fetch for one level.
///
/// `options` is empty unless `status` is `Success`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelResult {
    pub status: LevelStatus,
    pub options: Vec<String>,
    pub last_error: Option<String>,
}

impl LevelResult {
    pub const IDLE: LevelResult = LevelResult {
        status: LevelStatus::Idle,
        options: Vec::new(),
        last_error: None,
    };

    pub fn loading() -> Self {
        Self {
            status: LevelStatus::Loading,
            ..Self::IDLE
        }
    }

    pub fn success(options: Vec<String>) -> Self {
        Self {
            status: LevelStatus::Success,
            options,
            last_error: None,
        }
    }

    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            status: LevelStatus::Error,
            options: Vec::new(),
            last_error: Some(description.into()),
        }
    }

    /// What the presentation layer should show for this result.
    pub fn view(&self) -> LevelView<'_> {
        match self.status {
            LevelStatus::Idle => LevelView::Disabled,
            LevelStatus::Loading => LevelView::Loading,
            LevelStatus::Success if self.options.is_empty() => LevelView::Unavailable { reason: None },
            LevelStatus::Success => LevelView::Options(&self.options),
            LevelStatus::Error => LevelView::Unavailable {
                reason: self.last_error.as_deref(),
            },
        }
    }
}

impl Default for LevelResult {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Read-only projection of a [`LevelResult`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelView<'a> {
    /// Gated off: nothing is selectable.
    Disabled,
    Loading,
    /// Fetch failed, or succeeded with nothing in it.
    Unavailable { reason: Option<&'a str> },
    Options(&'a [String]),
}
