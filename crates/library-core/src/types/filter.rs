//! Conjunctive filters over JSON documents.
//!
//! A [`Filter`] is an ordered list of top-level field conditions that must
//! all hold. Backends either evaluate it directly ([`Filter::matches`]) or
//! translate it into a JSON containment pattern ([`Filter::containment`]).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A condition on a single top-level document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The field equals the value.
    Eq(Value),
    /// The field is an array that contains the value.
    Contains(Value),
}

/// A conjunction of field conditions. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    clauses: Vec<(String, Condition)>,
}

impl Filter {
    /// A filter matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an equality clause.
    pub fn eq(mut self, field: impl Into<String>, value: impl Serialize) -> Self {
        self.clauses
            .push((field.into(), Condition::Eq(to_value(value))));
        self
    }

    /// Add an array-membership clause.
    pub fn contains(mut self, field: impl Into<String>, value: impl Serialize) -> Self {
        self.clauses
            .push((field.into(), Condition::Contains(to_value(value))));
        self
    }

    /// Returns the clauses in insertion order.
    pub fn clauses(&self) -> &[(String, Condition)] {
        &self.clauses
    }

    /// Returns whether the filter has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate the filter against a document.
    pub fn matches(&self, document: &Value) -> bool {
        self.clauses.iter().all(|(field, condition)| {
            let actual = document.get(field);
            match condition {
                Condition::Eq(expected) => actual == Some(expected),
                Condition::Contains(expected) => actual
                    .and_then(Value::as_array)
                    .is_some_and(|items| items.contains(expected)),
            }
        })
    }

    /// Build a JSON object `P` such that a document `D` satisfies the filter
    /// iff `D @> P` under PostgreSQL `jsonb` containment.
    pub fn containment(&self) -> Value {
        let mut pattern = Map::new();
        for (field, condition) in &self.clauses {
            match condition {
                Condition::Eq(value) => {
                    pattern.insert(field.clone(), value.clone());
                }
                Condition::Contains(value) => {
                    let entry = pattern
                        .entry(field.clone())
                        .or_insert_with(|| Value::Array(Vec::new()));
                    if let Value::Array(items) = entry {
                        items.push(value.clone());
                    }
                }
            }
        }
        Value::Object(pattern)
    }
}

// Serializing ids, strings and enums into `Value` cannot fail.
fn to_value(value: impl Serialize) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
