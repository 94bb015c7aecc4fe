//! User-controlled view state: sort, search, pinned columns

use serde::Serialize;

/// Sort direction for the active column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

/// Active sort column and direction
///
/// `direction == None` exactly when `key` is `None`. The only ways to build a
/// `SortState` are `default()` and [`SortState::cycle`], which keep that pairing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SortState {
    key: Option<String>,
    direction: SortDirection,
}

impl SortState {
    /// Sort by `field` in the given direction (`None` clears)
    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        match direction {
            SortDirection::None => Self::default(),
            direction => Self {
                key: Some(field.into()),
                direction,
            },
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_active(&self) -> bool {
        self.key.is_some()
    }

    /// Next state after activating the header of `field`
    ///
    /// Progression for the same column: none → ascending → descending → none.
    /// Activating a different column starts it at ascending.
    pub fn cycle(&self, field: &str) -> Self {
        if self.key.as_deref() != Some(field) {
            return Self::by(field, SortDirection::Ascending);
        }

        match self.direction {
            SortDirection::None => Self::by(field, SortDirection::Ascending),
            SortDirection::Ascending => Self::by(field, SortDirection::Descending),
            SortDirection::Descending => Self::default(),
        }
    }
}

/// Free-text search term; empty means "no filter"
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SearchState {
    term: String,
}

impl SearchState {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_active(&self) -> bool {
        !self.term.is_empty()
    }

    pub fn set(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn clear(&mut self) {
        self.term.clear();
    }
}

/// Pinned column fields in the order they were pinned
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct PinnedColumns {
    fields: Vec<String>,
}

impl PinnedColumns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pinned(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Position of `field` in pin order
    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    /// Pin `field` at the end of the pin order; no-op if already pinned
    pub fn pin(&mut self, field: &str) -> bool {
        if self.is_pinned(field) {
            return false;
        }
        self.fields.push(field.to_string());
        true
    }

    pub fn unpin(&mut self, field: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f != field);
        self.fields.len() != before
    }

    /// Pin or unpin, returning whether the field is pinned afterwards
    pub fn toggle(&mut self, field: &str) -> bool {
        if !self.unpin(field) {
            self.pin(field);
            true
        } else {
            false
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PinnedColumns {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut pinned = PinnedColumns::new();
        for field in iter {
            let field: String = field.into();
            pinned.pin(&field);
        }
        pinned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_cycle_same_column() {
        let s0 = SortState::default();
        let s1 = s0.cycle("name");
        assert_eq!(s1.key(), Some("name"));
        assert_eq!(s1.direction(), SortDirection::Ascending);

        let s2 = s1.cycle("name");
        assert_eq!(s2.key(), Some("name"));
        assert_eq!(s2.direction(), SortDirection::Descending);

        let s3 = s2.cycle("name");
        assert_eq!(s3.key(), None);
        assert_eq!(s3.direction(), SortDirection::None);
    }

    #[test]
    fn test_sort_cycle_other_column_resets_to_ascending() {
        let s = SortState::by("name", SortDirection::Descending).cycle("id");
        assert_eq!(s.key(), Some("id"));
        assert_eq!(s.direction(), SortDirection::Ascending);
    }

    #[test]
    fn test_sort_by_none_clears_key() {
        let s = SortState::by("name", SortDirection::None);
        assert!(!s.is_active());
        assert_eq!(s, SortState::default());
    }

    #[test]
    fn test_pin_toggle_round_trip() {
        let mut pinned = PinnedColumns::new();
        assert!(pinned.toggle("email"));
        assert!(pinned.toggle("name"));
        assert_eq!(pinned.fields(), ["email", "name"]);

        assert!(!pinned.toggle("email"));
        assert_eq!(pinned.fields(), ["name"]);
        assert_eq!(pinned.position("name"), Some(0));
    }

    #[test]
    fn test_pin_is_idempotent() {
        let pinned: PinnedColumns = ["a", "a", "b"].into_iter().collect();
        assert_eq!(pinned.len(), 2);
    }

    #[test]
    fn test_search_state() {
        let mut search = SearchState::default();
        assert!(!search.is_active());
        search.set("abc");
        assert!(search.is_active());
        search.clear();
        assert_eq!(search.term(), "");
    }
}
