use std::{ops::Deref, rc::Rc};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const EMPTY: &str = "{}";

/// Parsed, immutable configuration of a mount point.
///
/// Cloning is cheap and every clone shares the same value. There is no mutable
/// access at any depth.
#[derive(Clone, PartialEq, Debug)]
pub struct Props(Rc<Value>);

impl Props {
    /// Parses attribute text, treating a missing or empty value as `{}`.
    pub fn parse(text: Option<&str>) -> serde_json::Result<Self> {
        let text = match text {
            Some(text) if !text.is_empty() => text,
            _ => EMPTY,
        };
        serde_json::from_str(text).map(|value| Self(Rc::new(value)))
    }

    pub fn empty() -> Self {
        Self(Rc::new(Value::Object(Map::new())))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Top-level object, or `None` when the payload is a JSON array or scalar.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    /// Deserializes the payload into a typed configuration struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&*self.0)
    }

    pub fn into_value(self) -> Value {
        Rc::try_unwrap(self.0).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl Default for Props {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for Props {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.0
    }
}

impl PartialEq<Value> for Props {
    fn eq(&self, other: &Value) -> bool {
        *self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::Props;

    #[test]
    fn defaults_to_empty_object() {
        assert_eq!(Props::parse(None).unwrap(), json!({}));
        assert_eq!(Props::parse(Some("")).unwrap(), json!({}));
        assert_eq!(Props::default(), json!({}));
    }

    #[test]
    fn parses_any_json_value() {
        let props = Props::parse(Some(r#"{"count": 3, "tags": ["a"]}"#)).unwrap();
        assert_eq!(props, json!({ "count": 3, "tags": ["a"] }));
        assert_eq!(props.get("count"), Some(&json!(3)));
        assert_eq!(props.as_object().map(|obj| obj.len()), Some(2));

        let props = Props::parse(Some("[1, 2]")).unwrap();
        assert_eq!(props, json!([1, 2]));
        assert!(props.as_object().is_none());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Props::parse(Some("{bad")).is_err());
        assert!(Props::parse(Some("   ")).is_err());
    }

    #[test]
    fn clones_share_payload() {
        let props = Props::parse(Some(r#"{"a": 1}"#)).unwrap();
        let clone = props.clone();
        assert!(std::ptr::eq(&*props, &*clone));
        assert_eq!(clone.into_value(), json!({ "a": 1 }));
    }

    #[test]
    fn deserializes_typed() {
        #[derive(Deserialize, PartialEq, Debug)]
        struct Counter {
            start: i32,
            #[serde(default)]
            step: Option<i32>,
        }

        let props = Props::parse(Some(r#"{"start": 5}"#)).unwrap();
        let counter: Counter = props.deserialize().unwrap();
        assert_eq!(
            counter,
            Counter {
                start: 5,
                step: None
            }
        );
    }
}
