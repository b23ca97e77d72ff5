use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A directory entry exactly as the service received it.
///
/// The service never validates bodies, so a record is any JSON object. Only
/// the `id` field carries meaning, and only when it is a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Strict identifier match; numeric or missing ids never match.
    pub fn has_id(&self, id: &str) -> bool {
        self.id() == Some(id)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

const DISPLAY_FIELDS: [&str; 3] = ["id", "name", "email"];

/// Typed view of a record used by the client.
///
/// Decoding never fails on a JSON object: an `id`, `name` or `email` that is
/// missing or not a string reads as empty, and its original value stays in
/// `extra` so the record serializes back unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            extra: Map::new(),
        }
    }

    fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        for (key, typed) in DISPLAY_FIELDS.iter().zip([&self.id, &self.name, &self.email]) {
            match self.extra.get(*key) {
                Some(original) if typed.is_empty() => {
                    fields.insert(key.to_string(), original.clone());
                }
                _ => {
                    fields.insert(key.to_string(), Value::String(typed.clone()));
                }
            }
        }
        for (key, value) in &self.extra {
            if !DISPLAY_FIELDS.contains(&key.as_str()) {
                fields.insert(key.clone(), value.clone());
            }
        }
        fields
    }
}

impl From<Map<String, Value>> for User {
    fn from(mut fields: Map<String, Value>) -> Self {
        let mut take = |key: &str| match fields.get(key) {
            Some(Value::String(_)) => match fields.shift_remove(key) {
                Some(Value::String(text)) => text,
                _ => String::new(),
            },
            _ => String::new(),
        };
        let id = take("id");
        let name = take("name");
        let email = take("email");
        Self {
            id,
            name,
            email,
            extra: fields,
        }
    }
}

impl From<Record> for User {
    fn from(record: Record) -> Self {
        record.into_fields().into()
    }
}

impl Serialize for User {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_fields().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(User::from)
    }
}
