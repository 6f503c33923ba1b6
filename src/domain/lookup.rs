//! The remote location lookup service, as seen by the cascade.

use super::errors::LookupResult;
use super::models::LevelKey;

/// Read-only access to the country/state/city directory.
///
/// All three operations are idempotent. Place names come back in the order the
/// service returns them and are never re-sorted.
pub trait LocationLookup: Send + Sync {
    fn list_countries(&self) -> LookupResult<Vec<String>>;

    fn list_states(&self, country: &str) -> LookupResult<Vec<String>>;

    fn list_cities(&self, country: &str, state: &str) -> LookupResult<Vec<String>>;
}

impl LevelKey {
    /// Runs the lookup operation addressed by this key.
    pub fn fetch(&self, lookup: &dyn LocationLookup) -> LookupResult<Vec<String>> {
        match self {
            LevelKey::Countries => lookup.list_countries(),
            LevelKey::States { country } => lookup.list_states(country),
            LevelKey::Cities { country, state } => lookup.list_cities(country, state),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fake::*;
    use super::*;
    use crate::domain::LookupFailure;

    #[test]
    fn test_key_routes_to_matching_operation() {
        let lookup = india_directory();

        assert_eq!(LevelKey::Countries.fetch(&lookup), Ok(names(&["India", "USA"])));
        assert_eq!(
            states("India").fetch(&lookup),
            Ok(names(&["Maharashtra", "Karnataka"]))
        );
        assert_eq!(
            cities("India", "Maharashtra").fetch(&lookup),
            Ok(names(&["Pune", "Mumbai"]))
        );
        assert_eq!(
            lookup.calls(),
            vec![
                LevelKey::Countries,
                states("India"),
                cities("India", "Maharashtra")
            ]
        );
    }

    #[test]
    fn test_unknown_key_fails() {
        let lookup = FakeLookup::new();
        assert_eq!(states("Atlantis").fetch(&lookup), Err(LookupFailure::Status(404)));
    }
}
