//! Identifier mapping between dinestore documents and MongoDB.
//!
//! Documents carry their identifier as a string. MongoDB stores server-style
//! identifiers as ObjectIds, so strings that parse as an ObjectId are stored as
//! one and read back as their hex form. Other non-blank strings are stored as-is.

use bson::{Bson, Document, oid::ObjectId};

use dinestore_core::document::{ID_FIELD, is_persisted_id};

pub(crate) struct IdMapper;

impl IdMapper {
    /// Converts a string identifier into the BSON value MongoDB stores.
    pub(crate) fn stored_id(id: &str) -> Bson {
        match ObjectId::parse_str(id) {
            Ok(oid) => Bson::ObjectId(oid),
            Err(_) => Bson::String(id.to_string()),
        }
    }

    /// Converts a filter operand compared against the identifier field.
    pub(crate) fn filter_value(value: &Bson) -> Bson {
        match value {
            Bson::String(id) => Self::stored_id(id),
            other => other.clone(),
        }
    }

    /// Reads an identifier back as the string documents expect.
    pub(crate) fn id_string(value: &Bson) -> String {
        match value {
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::String(id) => id.clone(),
            other => other.to_string(),
        }
    }

    /// Prepares a document for insertion, assigning an ObjectId when the
    /// identifier is blank or missing. Returns the identifier string alongside.
    pub(crate) fn prepare_insert(mut document: Document) -> (String, Document) {
        let id = match document.get(ID_FIELD).map(Self::id_string) {
            Some(id) if is_persisted_id(&id) => id,
            _ => ObjectId::new().to_hex(),
        };

        document.insert(ID_FIELD, Self::stored_id(&id));
        (id, document)
    }

    /// Prepares a replacement document. A blank identifier is dropped so the
    /// server keeps the matched document's `_id`.
    pub(crate) fn prepare_replacement(mut document: Document) -> Document {
        match document.get(ID_FIELD).map(Self::id_string) {
            Some(id) if is_persisted_id(&id) => {
                document.insert(ID_FIELD, Self::stored_id(&id));
            }
            _ => {
                document.remove(ID_FIELD);
            }
        }

        document
    }

    /// Restores a document read from MongoDB to its string-identifier form.
    pub(crate) fn restore(mut document: Document) -> Document {
        if let Some(id) = document.get(ID_FIELD).map(Self::id_string) {
            document.insert(ID_FIELD, id);
        }

        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn blank_identifier_gets_object_id_on_insert() {
        let (id, document) = IdMapper::prepare_insert(doc! { "_id": "", "Name": "Test" });

        let oid = ObjectId::parse_str(&id).unwrap();
        assert_eq!(document.get(ID_FIELD), Some(&Bson::ObjectId(oid)));
    }

    #[test]
    fn custom_identifier_is_kept_as_string() {
        let (id, document) = IdMapper::prepare_insert(doc! { "_id": "123456" });

        assert_eq!(id, "123456");
        assert_eq!(document.get_str(ID_FIELD).unwrap(), "123456");
    }

    #[test]
    fn blank_identifier_is_dropped_from_replacement() {
        let document = IdMapper::prepare_replacement(doc! { "_id": " ", "Name": "Test" });

        assert!(!document.contains_key(ID_FIELD));
    }

    #[test]
    fn restore_turns_object_id_into_hex() {
        let oid = ObjectId::new();

        let document = IdMapper::restore(doc! { "_id": oid, "Name": "Test" });

        assert_eq!(document.get_str(ID_FIELD).unwrap(), oid.to_hex());
    }
}
