//! Book record types.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Identifier of a stored book.
///
/// Wraps the datastore's native ObjectId. On the wire it is always the
/// 24-character lowercase hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(ObjectId);

/// The path token could not be parsed as a [`BookId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid book id {0:?}")]
pub struct InvalidBookId(pub String);

impl BookId {
    /// Generate a fresh, unique id.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for BookId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for BookId {
    type Err = InvalidBookId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidBookId(s.to_string()))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}

/// The mutable field set of a book, as supplied by clients.
///
/// Missing or `null` fields take their zero value, and an `_id` in the body
/// is ignored. Only a JSON object is accepted. Updates write all three
/// fields, so a body that omits `author` clears it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub price: f64,
}

impl<'de> Deserialize<'de> for BookFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BookFieldsVisitor)
    }
}

struct BookFieldsVisitor;

impl<'de> Visitor<'de> for BookFieldsVisitor {
    type Value = BookFields;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a book object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut fields = BookFields::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "title" => fields.title = map.next_value::<Option<String>>()?.unwrap_or_default(),
                "author" => fields.author = map.next_value::<Option<String>>()?.unwrap_or_default(),
                "price" => fields.price = map.next_value::<Option<f64>>()?.unwrap_or_default(),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(fields)
    }
}

/// A stored book.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: BookId,
    #[serde(flatten)]
    pub fields: BookFields,
}

impl Book {
    pub fn new(id: BookId, fields: BookFields) -> Self {
        Self { id, fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_parses_hex_only() {
        let id = BookId::new();
        assert_eq!(id.to_hex().parse::<BookId>(), Ok(id));
        assert!("not-an-id".parse::<BookId>().is_err());
        assert!("".parse::<BookId>().is_err());
        assert!("0123456789abcdef0123456".parse::<BookId>().is_err());
    }

    #[test]
    fn book_serializes_with_hex_id() {
        let id: BookId = "65f1c0ffee0000000000beef".parse().unwrap();
        let book = Book::new(
            id,
            BookFields {
                title: "Dune".into(),
                author: "Herbert".into(),
                price: 9.99,
            },
        );
        assert_eq!(
            serde_json::to_value(&book).unwrap(),
            json!({
                "_id": "65f1c0ffee0000000000beef",
                "title": "Dune",
                "author": "Herbert",
                "price": 9.99,
            })
        );
    }

    #[test]
    fn fields_default_missing_and_ignore_id() {
        let fields: BookFields =
            serde_json::from_value(json!({ "_id": "whatever", "title": "C" })).unwrap();
        assert_eq!(
            fields,
            BookFields {
                title: "C".into(),
                author: String::new(),
                price: 0.0,
            }
        );
    }

    #[test]
    fn fields_reject_wrong_types() {
        assert!(serde_json::from_value::<BookFields>(json!({ "price": "cheap" })).is_err());
        assert!(serde_json::from_value::<BookFields>(json!({ "title": 5 })).is_err());
        assert!(serde_json::from_value::<BookFields>(json!(["Dune"])).is_err());
        assert!(serde_json::from_str::<BookFields>(r#"["Dune","Herbert",9.99]"#).is_err());
        assert!(serde_json::from_str::<BookFields>("\"Dune\"").is_err());
    }

    #[test]
    fn null_fields_take_zero_value() {
        let fields: BookFields = serde_json::from_str(
            r#"{"title":"Dune","author":null,"price":null}"#,
        )
        .unwrap();
        assert_eq!(
            fields,
            BookFields {
                title: "Dune".into(),
                author: String::new(),
                price: 0.0,
            }
        );
    }

    #[test]
    fn book_with_flattened_fields_deserializes() {
        let book: Book = serde_json::from_value(json!({
            "_id": "65f1c0ffee0000000000beef",
            "title": "Dune",
            "author": "Herbert",
            "price": 9.99,
        }))
        .unwrap();
        assert_eq!(book.id.to_hex(), "65f1c0ffee0000000000beef");
        assert_eq!(book.fields.author, "Herbert");
    }
}
