//! Query translation from dinestore filter expressions to MongoDB query syntax.

use bson::{Bson, Document, doc};

use dinestore_core::{
    document::ID_FIELD,
    error::DocumentStoreError,
    query::{Expr, FieldOp, QueryVisitor},
};

use crate::id::IdMapper;

/// Characters with special meaning in a MongoDB (PCRE) regular expression.
const REGEX_META: &[char] = &[
    '\\', '.', '+', '*', '?', '(', ')', '|', '[', ']', '{', '}', '^', '$', '#', '&', '-', '~',
];

/// Escapes `input` so it matches literally inside a `$regex`.
pub(crate) fn escape_regex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if REGEX_META.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Translates dinestore filter expressions into MongoDB query documents.
pub(crate) struct MongoQueryTranslator;

impl MongoQueryTranslator {
    fn operand(field: &str, value: &Bson) -> Bson {
        if field == ID_FIELD {
            IdMapper::filter_value(value)
        } else {
            value.clone()
        }
    }

    fn visit_list(&mut self, operator: &str, exprs: &[Expr]) -> Result<Document, DocumentStoreError> {
        // MongoDB rejects empty $and/$or arrays.
        if exprs.is_empty() {
            return Ok(match operator {
                "$or" => doc! { "$expr": false },
                _ => doc! {},
            });
        }

        Ok(doc! {
            operator: exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = DocumentStoreError;

    fn visit_all(&mut self) -> Result<Self::Output, Self::Error> {
        Ok(doc! {})
    }

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        self.visit_list("$and", exprs)
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        self.visit_list("$or", exprs)
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        // Top-level $not is not a MongoDB operator; $nor of one clause is.
        Ok(doc! {
            "$nor": [self.visit_expr(expr)?],
        })
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        let value = Self::operand(field, value);

        Ok(doc! {
            field: match op {
                FieldOp::Eq => doc! { "$eq": value },
                FieldOp::Ne => doc! { "$ne": value },
                FieldOp::Contains => match value {
                    Bson::String(s) => doc! { "$regex": escape_regex(&s) },
                    Bson::Array(_) | Bson::Document(_) => {
                        return Err(DocumentStoreError::Backend(
                            "Contains operator requires a scalar value".to_string(),
                        ));
                    }
                    other => doc! { "$elemMatch": { "$eq": other } },
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use dinestore_core::query::Filter;

    fn translate(expr: &Expr) -> Document {
        MongoQueryTranslator.visit_expr(expr).unwrap()
    }

    #[test]
    fn match_all_is_empty_filter() {
        assert_eq!(translate(&Filter::all()), doc! {});
    }

    #[test]
    fn contains_is_escaped_case_sensitive_regex() {
        assert_eq!(
            translate(&Filter::contains("Name", "Joe's (Diner).")),
            doc! { "Name": { "$regex": "Joe's \\(Diner\\)\\." } }
        );
    }

    #[test]
    fn empty_contains_matches_any_string() {
        assert_eq!(
            translate(&Filter::contains("Name", "")),
            doc! { "Name": { "$regex": "" } }
        );
    }

    #[test]
    fn object_id_strings_are_coerced_for_identifier() {
        let oid = ObjectId::new();

        assert_eq!(
            translate(&Filter::eq(ID_FIELD, oid.to_hex())),
            doc! { "_id": { "$eq": oid } }
        );
        assert_eq!(
            translate(&Filter::eq(ID_FIELD, "123456")),
            doc! { "_id": { "$eq": "123456" } }
        );
        assert_eq!(
            translate(&Filter::eq("Name", oid.to_hex())),
            doc! { "Name": { "$eq": oid.to_hex() } }
        );
    }

    #[test]
    fn search_criteria_translate_to_and() {
        assert_eq!(
            translate(&Filter::contains("Name", "Pizza").and(Filter::eq("CuisineType", "Italian"))),
            doc! {
                "$and": [
                    { "Name": { "$regex": "Pizza" } },
                    { "CuisineType": { "$eq": "Italian" } },
                ]
            }
        );
    }

    #[test]
    fn not_becomes_nor() {
        assert_eq!(
            translate(&Filter::eq("CuisineType", "Thai").not()),
            doc! { "$nor": [{ "CuisineType": { "$eq": "Thai" } }] }
        );
    }

    #[test]
    fn empty_lists_stay_valid() {
        assert_eq!(translate(&Filter::and([])), doc! {});
        assert_eq!(translate(&Filter::or([])), doc! { "$expr": false });
    }
}
