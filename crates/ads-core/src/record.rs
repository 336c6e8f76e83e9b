//! Schema-less access to decoded API records.
//!
//! The two API versions disagree on the shape of the same resources, so
//! records stay as JSON objects and are read through dotted paths such as
//! `"value.image_id"`. Absent or mistyped values read as empty rather than
//! failing; callers treat them as "reference not present".

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decoded JSON object returned by the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps a JSON value, returning `None` for anything that is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, path: &str) -> Field<'_> {
        Field::lookup(&self.0, path)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A borrowed view of the value found at a dotted path.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a>(Option<&'a Value>);

impl<'a> Field<'a> {
    fn lookup(root: &'a Map<String, Value>, path: &str) -> Self {
        let mut segments = path.split('.');
        let Some(first) = segments.next() else {
            return Self(None);
        };

        let mut current = root.get(first);
        for segment in segments {
            current = match current {
                Some(Value::Object(map)) => map.get(segment),
                _ => None,
            };
        }
        Self(current)
    }

    /// Continues a dotted-path lookup from this value.
    pub fn get(&self, path: &str) -> Field<'a> {
        match self.0 {
            Some(Value::Object(map)) => Self::lookup(map, path),
            _ => Self(None),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self.0, None | Some(Value::Null))
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.0
    }

    /// The value only when it is a JSON string; empty otherwise.
    pub fn str(&self) -> &'a str {
        match self.0 {
            Some(Value::String(text)) => text.as_str(),
            _ => "",
        }
    }

    /// Renders strings, numbers and booleans as text.
    ///
    /// Integral numbers render without a fractional part so numeric ids
    /// survive the trip into string-keyed reference sets.
    pub fn text(&self) -> String {
        match self.0 {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => {
                if let Some(int) = number.as_i64() {
                    int.to_string()
                } else if let Some(uint) = number.as_u64() {
                    uint.to_string()
                } else {
                    match number.as_f64() {
                        Some(float) if float.fract() == 0.0 && float.is_finite() => {
                            format!("{float:.0}")
                        }
                        Some(float) => float.to_string(),
                        None => String::new(),
                    }
                }
            }
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => String::new(),
        }
    }

    /// Integer view of numbers and numeric strings.
    pub fn int(&self) -> Option<i64> {
        match self.0 {
            Some(Value::Number(number)) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|float| float.fract() == 0.0)
                    .map(|float| float as i64)
            }),
            Some(Value::String(text)) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn bool(&self) -> bool {
        matches!(self.0, Some(Value::Bool(true)))
    }

    /// Iterates the object elements of an array value, skipping anything else.
    pub fn objects(self) -> impl Iterator<Item = Field<'a>> + 'a {
        let items: &'a [Value] = match self.0 {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };
        items
            .iter()
            .filter(|item| item.is_object())
            .map(|item| Field(Some(item)))
    }

    pub fn to_record(&self) -> Option<Record> {
        match self.0 {
            Some(Value::Object(map)) => Some(Record(map.clone())),
            _ => None,
        }
    }
}
