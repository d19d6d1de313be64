//! Filter evaluation for in-memory documents.
//!
//! Implements the same matching rules the MongoDB backend asks the server for:
//! exact equality, and case-sensitive substring or array-membership for `Contains`.

use bson::{Bson, Document as BsonDocument, datetime::DateTime};
use std::collections::HashMap;

use dinestore_core::{
    error::{DocumentStoreError, DocumentStoreResult},
    query::{Expr, FieldOp, QueryVisitor},
};

/// Type-erased, comparable representation of BSON values.
///
/// Numeric types are normalized to f64 so `Int32(1)` equals `Double(1.0)`.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    DateTime(DateTime),
    String(&'a str),
    Array(Vec<Comparable<'a>>),
    Map(HashMap<&'a str, Comparable<'a>>),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(arr.iter().map(Comparable::from).collect()),
            Bson::Document(doc) => Comparable::Map(
                doc.iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect(),
            ),
            _ => Comparable::Null, // Other types are not comparable
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            _ => false,
        }
    }
}

pub(crate) struct DocumentEvaluator<'a> {
    document: &'a BsonDocument,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a BsonDocument) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> DocumentStoreResult<bool> {
        self.visit_expr(expr)
    }

    /// Whether `document` satisfies `expr`.
    pub fn matches(document: &BsonDocument, expr: &Expr) -> DocumentStoreResult<bool> {
        DocumentEvaluator::new(document).evaluate(expr)
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

    fn visit_all(&mut self) -> Result<Self::Output, Self::Error> {
        Ok(true)
    }

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if self.visit_expr(expr)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        Ok(!self.visit_expr(expr)?)
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        let Some(field_value) = self.document.get(field) else {
            // A missing field only satisfies "not equal".
            return Ok(matches!(op, FieldOp::Ne));
        };

        match op {
            FieldOp::Eq => Ok(Comparable::from(field_value) == Comparable::from(value)),
            FieldOp::Ne => Ok(Comparable::from(field_value) != Comparable::from(value)),
            FieldOp::Contains => match (Comparable::from(field_value), Comparable::from(value)) {
                (Comparable::String(left), Comparable::String(right)) => Ok(left.contains(right)),
                (Comparable::Array(array), needle) => Ok(array.iter().any(|item| item == &needle)),
                (_, Comparable::String(_)) => Ok(false),
                _ => Err(DocumentStoreError::Backend(
                    "Contains operator requires a string or array value".to_string(),
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use dinestore_core::query::Filter;

    fn sample() -> BsonDocument {
        doc! {
            "Name": "Luigi's Pizzeria",
            "CuisineType": "Italian",
            "Seats": 40,
            "Tags": ["family", "takeout"],
        }
    }

    #[test]
    fn contains_is_case_sensitive_substring() {
        let doc = sample();

        assert!(DocumentEvaluator::matches(&doc, &Filter::contains("Name", "Pizz")).unwrap());
        assert!(!DocumentEvaluator::matches(&doc, &Filter::contains("Name", "pizz")).unwrap());
    }

    #[test]
    fn empty_substring_matches_any_string() {
        assert!(DocumentEvaluator::matches(&sample(), &Filter::contains("Name", "")).unwrap());
    }

    #[test]
    fn empty_equality_requires_empty_value() {
        assert!(!DocumentEvaluator::matches(&sample(), &Filter::eq("CuisineType", "")).unwrap());
        assert!(DocumentEvaluator::matches(&doc! { "CuisineType": "" }, &Filter::eq("CuisineType", "")).unwrap());
    }

    #[test]
    fn numbers_compare_across_representations() {
        assert!(DocumentEvaluator::matches(&sample(), &Filter::eq("Seats", 40.0)).unwrap());
    }

    #[test]
    fn contains_checks_array_membership() {
        assert!(DocumentEvaluator::matches(&sample(), &Filter::contains("Tags", "takeout")).unwrap());
        assert!(!DocumentEvaluator::matches(&sample(), &Filter::contains("Tags", "delivery")).unwrap());
    }

    #[test]
    fn missing_field_only_satisfies_not_equal() {
        let doc = sample();

        assert!(!DocumentEvaluator::matches(&doc, &Filter::eq("Phone", "555")).unwrap());
        assert!(!DocumentEvaluator::matches(&doc, &Filter::contains("Phone", "")).unwrap());
        assert!(DocumentEvaluator::matches(&doc, &Filter::ne("Phone", "555")).unwrap());
    }

    #[test]
    fn logical_operators_combine() {
        let doc = sample();
        let italian_pizza = Filter::contains("Name", "Pizza").and(Filter::eq("CuisineType", "Italian"));
        let thai_or_italian = Filter::or([
            Filter::eq("CuisineType", "Thai"),
            Filter::eq("CuisineType", "Italian"),
        ]);

        assert!(DocumentEvaluator::matches(&doc, &italian_pizza).unwrap());
        assert!(DocumentEvaluator::matches(&doc, &thai_or_italian).unwrap());
        assert!(!DocumentEvaluator::matches(&doc, &thai_or_italian.not()).unwrap());
        assert!(DocumentEvaluator::matches(&doc, &Filter::all()).unwrap());
    }
}
