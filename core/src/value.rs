// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Normalized response values.
//!
//! API responses are parsed as [`serde_json::Value`] and then rebuilt into [`Value`],
//! where every mapping key is a [`Symbol`]. Normalization never changes the shape of
//! the data: arrays keep their order and length, mappings keep all their keys.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Symbol is the canonical representation of a mapping key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Create a symbol from its string form.
    pub fn new(name: &str) -> Self {
        Symbol(Arc::from(name))
    }

    /// Get the string form of this symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol(Arc::from(name))
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value is a normalized JSON value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(serde_json::Number),
    /// JSON string.
    String(String),
    /// JSON array.
    Array(Vec<Value>),
    /// JSON object with symbol keys.
    Object(BTreeMap<Symbol, Value>),
}

impl Value {
    /// Look up `key` if this value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Returns the elements if this value is an array.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this value is an object.
    pub fn as_object(&self) -> Option<&BTreeMap<Symbol, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the string if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this value is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k.as_str(), v)?;
                }
                map.end()
            }
        }
    }
}

/// Renders the value as compact JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// Normalize rebuilds a value with every mapping key converted to a [`Symbol`].
pub trait Normalize {
    /// Consume self and return the normalized value.
    fn normalize(self) -> Value;
}

impl Normalize for serde_json::Value {
    fn normalize(self) -> Value {
        match self {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Normalize::normalize).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (Symbol::from(k), v.normalize()))
                    .collect(),
            ),
        }
    }
}

impl Normalize for Value {
    fn normalize(self) -> Value {
        match self {
            Value::Array(items) => {
                Value::Array(items.into_iter().map(Normalize::normalize).collect())
            }
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (Symbol::new(k.as_str()), v.normalize()))
                    .collect(),
            ),
            scalar => scalar,
        }
    }
}

/// Normalize a parsed response body.
pub fn normalize(value: impl Normalize) -> Value {
    value.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::collection::{btree_map, vec};
    use proptest::prelude::*;
    use serde_json::json;

    fn obj<const N: usize>(entries: [(&str, Value); N]) -> Value {
        Value::Object(entries.into_iter().map(|(k, v)| (Symbol::new(k), v)).collect())
    }

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    #[test]
    fn test_normalize_array_of_objects() {
        let raw = json!([{"test1": "Value1"}, {"test2": [{"test3": "Value3"}]}]);

        assert_eq!(
            normalize(raw),
            Value::Array(vec![
                obj([("test1", s("Value1"))]),
                obj([("test2", Value::Array(vec![obj([("test3", s("Value3"))])]))]),
            ])
        );
    }

    #[test]
    fn test_normalize_nested_object() {
        let raw = json!({"test1": "Value1", "test2": {"test3": "Value3"}});

        assert_eq!(
            normalize(raw),
            obj([
                ("test1", s("Value1")),
                ("test2", obj([("test3", s("Value3"))])),
            ])
        );
    }

    #[test]
    fn test_normalize_scalars_unchanged() {
        assert_eq!(normalize(json!(null)), Value::Null);
        assert_eq!(normalize(json!(true)), Value::Bool(true));
        assert_eq!(normalize(json!(42)), Value::Number(42.into()));
        assert_eq!(normalize(json!("text")), s("text"));
    }

    #[test]
    fn test_value_accessors() {
        let v = normalize(json!({"statuses": [{"text": "Tweet 1"}]}));

        let statuses = v.get("statuses").and_then(Value::as_array).unwrap();
        assert_eq!(statuses[0].get("text").and_then(Value::as_str), Some("Tweet 1"));
        assert!(v.get("missing").is_none());
        assert!(statuses[0].get("text").unwrap().get("nested").is_none());
        assert_eq!(format!("{:?}", Symbol::new("text")), ":text");
    }

    #[test]
    fn test_display_is_compact_json() {
        let raw = json!({"b": [1, null, "x"], "a": {"c": false}});

        assert_eq!(normalize(raw).to_string(), r#"{"a":{"c":false},"b":[1,null,"x"]}"#);
    }

    fn json_value_strategy() -> impl Strategy<Value = serde_json::Value> {
        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::Bool),
            any::<i64>().prop_map(|n| serde_json::Value::Number(n.into())),
            "[a-zA-Z0-9 ]{0,20}".prop_map(serde_json::Value::String),
        ];

        leaf.prop_recursive(4, 32, 5, |inner| {
            prop_oneof![
                vec(inner.clone(), 0..5).prop_map(serde_json::Value::Array),
                btree_map("[a-zA-Z_][a-zA-Z0-9_]{0,10}", inner, 0..5)
                    .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
            ]
        })
    }

    fn same_shape(raw: &serde_json::Value, norm: &Value) -> bool {
        match (raw, norm) {
            (serde_json::Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_shape(x, y))
            }
            (serde_json::Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k.as_str()).is_some_and(|w| same_shape(v, w)))
            }
            (serde_json::Value::Null, Value::Null) => true,
            (serde_json::Value::Bool(a), Value::Bool(b)) => a == b,
            (serde_json::Value::Number(a), Value::Number(b)) => a == b,
            (serde_json::Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }

    proptest! {
        #[test]
        fn prop_normalize_preserves_shape(raw in json_value_strategy()) {
            let norm = normalize(raw.clone());
            prop_assert!(same_shape(&raw, &norm));
        }

        #[test]
        fn prop_normalize_is_idempotent(raw in json_value_strategy()) {
            let once = normalize(raw);
            prop_assert_eq!(normalize(once.clone()), once);
        }

        #[test]
        fn prop_display_round_trips_through_json(raw in json_value_strategy()) {
            let norm = normalize(raw.clone());
            let reparsed: serde_json::Value = serde_json::from_str(&norm.to_string()).unwrap();
            prop_assert_eq!(reparsed, raw);
        }
    }
}
