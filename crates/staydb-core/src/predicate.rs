// crates/staydb-core/src/predicate.rs

//! # Predicate Tree
//!
//! A typed, immutable condition handed to a listing store. The compiler in
//! [`crate::filter`] builds it; a store either interprets it directly
//! ([`Predicate::matches`]) or renders it for a relational client
//! ([`Predicate::to_where`]).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value as Json};

/// Columns the filtering core can talk about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    UserId,
    ListingId,
    Category,
    RoomCount,
    GuestCount,
    BathroomCount,
    LocationValue,
    City,
    StartDate,
    EndDate,
}

impl Field {
    /// Column name as used by the relational schema.
    pub fn column(self) -> &'static str {
        match self {
            Field::UserId => "userId",
            Field::ListingId => "listingId",
            Field::Category => "category",
            Field::RoomCount => "roomCount",
            Field::GuestCount => "guestCount",
            Field::BathroomCount => "bathroomCount",
            Field::LocationValue => "locationValue",
            Field::City => "city",
            Field::StartDate => "startDate",
            Field::EndDate => "endDate",
        }
    }
}

/// Related record sets reachable from a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    /// Listing → its reservations.
    Reservations,
    /// Reservation → its listing.
    Listing,
}

impl Relation {
    pub fn name(self) -> &'static str {
        match self {
            Relation::Reservations => "reservations",
            Relation::Listing => "listing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Str(String),
    Date(DateTime<Utc>),
}

impl Value {
    fn to_json(&self) -> Json {
        match self {
            Value::Int(n) => json!(n),
            Value::Str(s) => json!(s),
            Value::Date(d) => json!(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    fn partial_cmp_same(&self, other: &Value) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

/// A condition over one record and, through [`Predicate::Exists`], its
/// related records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Predicate {
    /// All must hold. `And(vec![])` matches everything.
    And(Vec<Predicate>),
    /// At least one must hold. `Or(vec![])` matches nothing.
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Eq(Field, Value),
    Gte(Field, Value),
    Lte(Field, Value),
    /// Substring containment; `insensitive` compares lower-cased forms.
    Contains {
        field: Field,
        value: String,
        insensitive: bool,
    },
    /// Field equals one of the values. Compilers never emit an empty list.
    In(Field, Vec<Value>),
    /// Some related record satisfies the inner predicate.
    Exists(Relation, Box<Predicate>),
}

/// A row a [`Predicate`] can be evaluated against.
pub trait Record {
    /// The value of `field`, or `None` when the column is null or unknown
    /// for this record type. Comparisons against `None` are false.
    fn value(&self, field: Field) -> Option<Value>;

    /// Whether any record reachable through `relation` satisfies `pred`.
    fn exists(&self, relation: Relation, pred: &Predicate) -> bool;
}

impl Predicate {
    pub fn match_all() -> Self {
        Predicate::And(Vec::new())
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, Predicate::And(clauses) if clauses.is_empty())
    }

    pub fn equals(field: Field, value: impl Into<Value>) -> Self {
        Predicate::Eq(field, value.into())
    }

    pub fn gte(field: Field, value: impl Into<Value>) -> Self {
        Predicate::Gte(field, value.into())
    }

    pub fn lte(field: Field, value: impl Into<Value>) -> Self {
        Predicate::Lte(field, value.into())
    }

    pub fn contains_insensitive(field: Field, value: impl Into<String>) -> Self {
        Predicate::Contains {
            field,
            value: value.into(),
            insensitive: true,
        }
    }

    pub fn exists(relation: Relation, inner: Predicate) -> Self {
        Predicate::Exists(relation, Box::new(inner))
    }

    pub fn negate(inner: Predicate) -> Self {
        Predicate::Not(Box::new(inner))
    }

    /// Top-level clauses when this is an `And`, otherwise the predicate itself.
    pub fn clauses(&self) -> &[Predicate] {
        match self {
            Predicate::And(clauses) => clauses,
            other => std::slice::from_ref(other),
        }
    }

    /// Evaluate against a single record.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        use std::cmp::Ordering;

        match self {
            Predicate::And(ps) => ps.iter().all(|p| p.matches(record)),
            Predicate::Or(ps) => ps.iter().any(|p| p.matches(record)),
            Predicate::Not(p) => !p.matches(record),
            Predicate::Eq(field, v) => record.value(*field).as_ref() == Some(v),
            Predicate::Gte(field, v) => record
                .value(*field)
                .and_then(|actual| actual.partial_cmp_same(v))
                .is_some_and(|o| o != Ordering::Less),
            Predicate::Lte(field, v) => record
                .value(*field)
                .and_then(|actual| actual.partial_cmp_same(v))
                .is_some_and(|o| o != Ordering::Greater),
            Predicate::Contains {
                field,
                value,
                insensitive,
            } => match record.value(*field) {
                Some(Value::Str(actual)) if *insensitive => {
                    actual.to_lowercase().contains(&value.to_lowercase())
                }
                Some(Value::Str(actual)) => actual.contains(value.as_str()),
                _ => false,
            },
            Predicate::In(field, values) => record
                .value(*field)
                .is_some_and(|actual| values.contains(&actual)),
            Predicate::Exists(relation, inner) => record.exists(*relation, inner),
        }
    }

    /// Render in the relational client's `where` JSON shape.
    ///
    /// ```rust
    /// use staydb_core::predicate::{Field, Predicate};
    /// use serde_json::json;
    ///
    /// let p = Predicate::And(vec![Predicate::gte(Field::RoomCount, 2)]);
    /// assert_eq!(p.to_where(), json!({ "AND": [{ "roomCount": { "gte": 2 } }] }));
    /// assert_eq!(Predicate::match_all().to_where(), json!({}));
    /// ```
    pub fn to_where(&self) -> Json {
        match self {
            Predicate::And(ps) if ps.is_empty() => json!({}),
            Predicate::And(ps) => json!({ "AND": ps.iter().map(Self::to_where).collect::<Vec<_>>() }),
            Predicate::Or(ps) => json!({ "OR": ps.iter().map(Self::to_where).collect::<Vec<_>>() }),
            Predicate::Not(p) => json!({ "NOT": p.to_where() }),
            Predicate::Eq(field, v) => single(field.column(), v.to_json()),
            Predicate::Gte(field, v) => single(field.column(), json!({ "gte": v.to_json() })),
            Predicate::Lte(field, v) => single(field.column(), json!({ "lte": v.to_json() })),
            Predicate::Contains {
                field,
                value,
                insensitive,
            } => {
                let mut op = Map::new();
                op.insert("contains".into(), json!(value));
                if *insensitive {
                    op.insert("mode".into(), json!("insensitive"));
                }
                single(field.column(), Json::Object(op))
            }
            Predicate::In(field, values) => single(
                field.column(),
                json!({ "in": values.iter().map(Value::to_json).collect::<Vec<_>>() }),
            ),
            // to-many relations filter with `some`, to-one relations nest directly
            Predicate::Exists(relation @ Relation::Reservations, inner) => {
                single(relation.name(), json!({ "some": inner.to_where() }))
            }
            Predicate::Exists(relation @ Relation::Listing, inner) => {
                single(relation.name(), inner.to_where())
            }
        }
    }
}

fn single(key: &str, value: Json) -> Json {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Json::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Row(HashMap<Field, Value>);

    impl Record for Row {
        fn value(&self, field: Field) -> Option<Value> {
            self.0.get(&field).cloned()
        }

        fn exists(&self, _relation: Relation, _pred: &Predicate) -> bool {
            false
        }
    }

    fn row() -> Row {
        Row(HashMap::from([
            (Field::RoomCount, Value::Int(3)),
            (Field::City, Value::from("Lisbon")),
            (Field::LocationValue, Value::from("PT")),
        ]))
    }

    #[test]
    fn gte_is_inclusive() {
        assert!(Predicate::gte(Field::RoomCount, 3).matches(&row()));
        assert!(Predicate::gte(Field::RoomCount, 2).matches(&row()));
        assert!(!Predicate::gte(Field::RoomCount, 4).matches(&row()));
    }

    #[test]
    fn missing_or_mistyped_values_never_match() {
        assert!(!Predicate::gte(Field::GuestCount, 1).matches(&row()));
        assert!(!Predicate::gte(Field::City, 1).matches(&row()));
        assert!(!Predicate::equals(Field::Category, "Beach").matches(&row()));
    }

    #[test]
    fn contains_respects_case_mode() {
        assert!(Predicate::contains_insensitive(Field::City, "LISB").matches(&row()));
        let sensitive = Predicate::Contains {
            field: Field::City,
            value: "LISB".into(),
            insensitive: false,
        };
        assert!(!sensitive.matches(&row()));
    }

    #[test]
    fn boolean_composition() {
        let in_pt = Predicate::In(Field::LocationValue, vec!["ES".into(), "PT".into()]);
        assert!(in_pt.matches(&row()));
        assert!(!Predicate::negate(in_pt).matches(&row()));
        assert!(Predicate::match_all().matches(&row()));
        assert!(!Predicate::Or(vec![]).matches(&row()));
    }

    #[test]
    fn where_rendering_of_nested_exists() {
        let p = Predicate::negate(Predicate::exists(
            Relation::Reservations,
            Predicate::And(vec![Predicate::equals(Field::UserId, "u1")]),
        ));
        assert_eq!(
            p.to_where(),
            json!({ "NOT": { "reservations": { "some": { "AND": [{ "userId": "u1" }] } } } })
        );
    }

    #[test]
    fn where_rendering_of_contains() {
        let p = Predicate::contains_insensitive(Field::City, "port");
        assert_eq!(
            p.to_where(),
            json!({ "city": { "contains": "port", "mode": "insensitive" } })
        );
    }
}
