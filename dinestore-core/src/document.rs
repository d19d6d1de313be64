//! Core traits for document representation and serialization.
//!
//! Documents are plain serde types. The store only needs to know how to read and
//! write their identifier, and which collection they live in by default.

use bson::{Bson, Document as BsonDocument, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};

use crate::error::{DocumentStoreError, DocumentStoreResult};

/// Name of the serialized identifier field shared by every document type.
pub const ID_FIELD: &str = "_id";

/// Returns `true` if the identifier marks a persisted document.
///
/// An identifier that is empty or only whitespace is the blank-identifier
/// sentinel: the document was never stored, or was not found.
pub fn is_persisted_id(id: &str) -> bool {
    !id.trim().is_empty()
}

/// Core trait that all documents stored in a document store must implement.
///
/// Implementors must serialize their identifier under [`ID_FIELD`] as a string,
/// and leave it empty until the store assigns one on insert.
///
/// # Example
///
/// ```ignore
/// use dinestore::document::Document;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// pub struct Menu {
///     #[serde(rename = "_id", default)]
///     pub id: String,
///     pub title: String,
/// }
///
/// impl Document for Menu {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn set_id(&mut self, id: String) {
///         self.id = id;
///     }
///
///     fn collection_name() -> &'static str {
///         "menus"
///     }
/// }
/// ```
pub trait Document: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns this document's identifier, possibly blank.
    fn id(&self) -> &str;

    /// Overwrites this document's identifier. Called by the store after an insert.
    fn set_id(&mut self, id: String);

    /// Returns the name of the collection this document belongs to.
    fn collection_name() -> &'static str;

    /// Whether this document carries a non-blank identifier.
    fn is_persisted(&self) -> bool {
        is_persisted_id(self.id())
    }
}

/// Extension trait providing BSON conversion for documents.
///
/// Automatically implemented for all types that implement [`Document`].
pub trait DocumentExt: Document {
    /// Converts this document to a BSON document for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the type does not serialize to a document.
    fn to_bson_document(&self) -> DocumentStoreResult<BsonDocument>;

    /// Creates a document from a stored BSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    fn from_bson_document(document: BsonDocument) -> DocumentStoreResult<Self>;
}

impl<D: Document> DocumentExt for D {
    fn to_bson_document(&self) -> DocumentStoreResult<BsonDocument> {
        match serialize_to_bson(self)? {
            Bson::Document(document) => Ok(document),
            other => Err(DocumentStoreError::InvalidDocument(format!(
                "expected a document, serialized to {:?}",
                other.element_type()
            ))),
        }
    }

    fn from_bson_document(document: BsonDocument) -> DocumentStoreResult<Self> {
        Ok(deserialize_from_bson(Bson::Document(document))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Note {
        #[serde(rename = "_id", default)]
        id: String,
        body: String,
    }

    impl Document for Note {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }

        fn collection_name() -> &'static str {
            "notes"
        }
    }

    #[test]
    fn blank_and_whitespace_ids_are_not_persisted() {
        assert!(!is_persisted_id(""));
        assert!(!is_persisted_id("   "));
        assert!(!is_persisted_id("\t\n"));
        assert!(is_persisted_id("123456"));
    }

    #[test]
    fn identifier_is_serialized_under_id_field() {
        let note = Note { id: "abc".into(), body: "hello".into() };
        let document = note.to_bson_document().unwrap();

        assert_eq!(document.get_str(ID_FIELD).unwrap(), "abc");
        assert_eq!(Note::from_bson_document(document).unwrap(), note);
    }

    #[test]
    fn missing_identifier_deserializes_blank() {
        let note = Note::from_bson_document(doc! { "body": "hi" }).unwrap();

        assert!(!note.is_persisted());
        assert_eq!(note.body, "hi");
    }
}
