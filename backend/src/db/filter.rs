//! Declarative track filters
//!
//! A [`TrackFilter`] is a list of `(field, operator, value)` terms combined
//! with logical OR. It knows nothing about connections or query execution;
//! [`TrackFilter::to_sql_condition`] renders it into a parameterized WHERE
//! fragment for the track repository.

/// Track attributes a filter term can match against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackField {
    Title,
    Description,
    Url,
    /// Username of the user who posted the track
    OwnerUsername,
}

impl TrackField {
    /// Qualified column name. Track columns use alias `t`, the owner join uses `u`.
    pub fn column(self) -> &'static str {
        match self {
            TrackField::Title => "t.title",
            TrackField::Description => "t.description",
            TrackField::Url => "t.url",
            TrackField::OwnerUsername => "u.username",
        }
    }

    /// Whether matching on this field needs the users join
    pub fn needs_owner_join(self) -> bool {
        matches!(self, TrackField::OwnerUsername)
    }
}

/// Comparison operators for filter terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOp {
    /// Literal substring match, ignoring case
    ContainsIgnoreCase,
}

/// A single `(field, operator, value)` term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFilterTerm {
    pub field: TrackField,
    pub op: MatchOp,
    pub value: String,
}

impl TrackFilterTerm {
    pub fn new(field: TrackField, op: MatchOp, value: impl Into<String>) -> Self {
        Self {
            field,
            op,
            value: value.into(),
        }
    }

    fn to_sql(&self) -> (String, String) {
        match self.op {
            // instr() keeps '%' and '_' in the input literal. Both sides go
            // through SQLite's lower() so they fold identically.
            MatchOp::ContainsIgnoreCase => (
                format!("instr(lower({}), lower(?)) > 0", self.field.column()),
                self.value.clone(),
            ),
        }
    }
}

/// Terms combined with logical OR. An empty filter matches every track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackFilter {
    pub any_of: Vec<TrackFilterTerm>,
}

impl TrackFilter {
    /// Free-text search over title, description, url and the owner's username.
    ///
    /// Empty search text yields an empty filter.
    pub fn search(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }

        let any_of = [
            TrackField::Title,
            TrackField::Description,
            TrackField::Url,
            TrackField::OwnerUsername,
        ]
        .into_iter()
        .map(|field| TrackFilterTerm::new(field, MatchOp::ContainsIgnoreCase, text))
        .collect();

        Self { any_of }
    }

    /// Add a term to the disjunction
    pub fn or(mut self, term: TrackFilterTerm) -> Self {
        self.any_of.push(term);
        self
    }

    /// Check if the filter has any terms
    pub fn is_empty(&self) -> bool {
        self.any_of.is_empty()
    }

    /// Whether rendering this filter requires joining the owner's user row
    pub fn needs_owner_join(&self) -> bool {
        self.any_of.iter().any(|term| term.field.needs_owner_join())
    }

    /// Render the filter as a WHERE fragment and the values to bind, in order.
    ///
    /// Returns `None` for an empty filter.
    pub fn to_sql_condition(&self) -> Option<(String, Vec<String>)> {
        if self.is_empty() {
            return None;
        }

        let (conditions, values): (Vec<String>, Vec<String>) =
            self.any_of.iter().map(TrackFilterTerm::to_sql).unzip();

        Some((format!("({})", conditions.join(" OR ")), values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_search_covers_all_fields() {
        let filter = TrackFilter::search("Lofi");
        let fields: Vec<TrackField> = filter.any_of.iter().map(|t| t.field).collect();
        assert_eq!(
            fields,
            vec![
                TrackField::Title,
                TrackField::Description,
                TrackField::Url,
                TrackField::OwnerUsername,
            ]
        );
        assert!(filter.any_of.iter().all(|t| t.op == MatchOp::ContainsIgnoreCase));
        assert!(filter.needs_owner_join());
    }

    #[test]
    fn test_empty_search_is_empty_filter() {
        let filter = TrackFilter::search("");
        assert!(filter.is_empty());
        assert!(filter.to_sql_condition().is_none());
    }

    #[test]
    fn test_sql_rendering() {
        let (sql, values) = TrackFilter::search("LoFi").to_sql_condition().unwrap();
        assert_eq!(
            sql,
            "(instr(lower(t.title), lower(?)) > 0 OR instr(lower(t.description), lower(?)) > 0 \
             OR instr(lower(t.url), lower(?)) > 0 OR instr(lower(u.username), lower(?)) > 0)"
        );
        assert_eq!(values, vec!["LoFi"; 4]);
    }

    #[test]
    fn test_single_term_without_owner_join() {
        let filter = TrackFilter::default().or(TrackFilterTerm::new(
            TrackField::Url,
            MatchOp::ContainsIgnoreCase,
            "soundcloud",
        ));
        assert!(!filter.needs_owner_join());

        let (sql, values) = filter.to_sql_condition().unwrap();
        assert_eq!(sql, "(instr(lower(t.url), lower(?)) > 0)");
        assert_eq!(values, vec!["soundcloud".to_string()]);
    }
}
