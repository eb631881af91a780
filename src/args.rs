use serde::Serialize;
use serde_json::Value;

use crate::error::{PosterousError, Result};

/// Ordered call arguments: parameter name to JSON scalar (or array/object).
///
/// Insertion order is kept; setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    entries: Vec<(String, Value)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds arguments from a value that serializes to a JSON object.
    ///
    /// ```
    /// use posterous::Args;
    ///
    /// #[derive(serde::Serialize)]
    /// struct ByTag<'a> {
    ///     tag: &'a str,
    ///     page: u32,
    /// }
    ///
    /// let args = Args::from_serialize(&ByTag { tag: "news", page: 2 }).unwrap();
    /// assert_eq!(args.get("page"), Some(&serde_json::json!(2)));
    /// ```
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| PosterousError::InvalidArguments(e.to_string()))?;
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(PosterousError::InvalidArguments(format!(
                "expected a key/value mapping, got {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flattens the arguments into form/query pairs.
    ///
    /// Follows the usual `http_build_query` layout: arrays become `key[0]`,
    /// `key[1]`, objects become `key[field]`, booleans are `1`/`0` and
    /// `null` entries are left out.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            flatten(key, value, &mut out);
        }
        out
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Args::new();
        for (k, v) in iter {
            args.set(k, v);
        }
        args
    }
}

/// Keeps only the entries whose key is in `allowed`, in their original order.
///
/// Keys outside the allow-list are dropped silently.
pub fn filter(args: &Args, allowed: &[&str]) -> Args {
    Args {
        entries: args
            .entries
            .iter()
            .filter(|(k, _)| allowed.contains(&k.as_str()))
            .cloned()
            .collect(),
    }
}

fn flatten(key: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key.to_string(), if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => out.push((key.to_string(), n.to_string())),
        Value::String(s) => out.push((key.to_string(), s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(&format!("{}[{}]", key, i), item, out);
            }
        }
        Value::Object(map) => {
            for (field, item) in map {
                flatten(&format!("{}[{}]", key, field), item, out);
            }
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(v: &[(&str, &str)]) -> Vec<(String, String)> {
        v.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn filter_keeps_only_allowed_keys_in_order() {
        let args = Args::new()
            .with("tag", "news")
            .with("format", "xml")
            .with("page", 2)
            .with("since_id", 10);

        let kept = filter(&args, &["since_id", "page", "tag"]);
        let keys: Vec<&str> = kept.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["tag", "page", "since_id"]);
        assert_eq!(kept.get("page"), Some(&json!(2)));
        assert!(!kept.contains_key("format"));
    }

    #[test]
    fn filter_with_empty_allow_list_drops_everything() {
        let args = Args::new().with("tag", "news");
        assert!(filter(&args, &[]).is_empty());
    }

    #[test]
    fn filter_of_empty_args_is_empty() {
        assert!(filter(&Args::new(), &["tag"]).is_empty());
    }

    #[test]
    fn set_replaces_in_place() {
        let mut args = Args::new().with("a", 1).with("b", 2);
        args.set("a", "x");
        assert_eq!(args.len(), 2);
        assert_eq!(args.to_pairs(), pairs(&[("a", "x"), ("b", "2")]));
    }

    #[test]
    fn scalars_flatten_like_a_query_builder() {
        let args = Args::new()
            .with("tag", "news")
            .with("page", 2)
            .with("draft", false)
            .with("autopost", true)
            .with("skip", Value::Null);
        assert_eq!(
            args.to_pairs(),
            pairs(&[("tag", "news"), ("page", "2"), ("draft", "0"), ("autopost", "1")])
        );
    }

    #[test]
    fn arrays_and_objects_use_bracketed_keys() {
        let args = Args::new()
            .with("ids", json!([3, 5]))
            .with("post", json!({"title": "Hi", "tags": ["a", "b"]}));
        assert_eq!(
            args.to_pairs(),
            pairs(&[
                ("ids[0]", "3"),
                ("ids[1]", "5"),
                ("post[title]", "Hi"),
                ("post[tags][0]", "a"),
                ("post[tags][1]", "b"),
            ])
        );
    }

    #[test]
    fn from_serialize_keeps_field_order() {
        #[derive(Serialize)]
        struct Query {
            tag: String,
            page: u32,
            #[serde(skip_serializing_if = "Option::is_none")]
            since_id: Option<u64>,
        }

        let args = Args::from_serialize(&Query {
            tag: "rust".into(),
            page: 1,
            since_id: None,
        })
        .unwrap();
        assert_eq!(args.to_pairs(), pairs(&[("tag", "rust"), ("page", "1")]));
    }

    #[test]
    fn from_serialize_rejects_non_objects() {
        let err = Args::from_serialize(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, PosterousError::InvalidArguments(_)));
    }

    #[test]
    fn collects_from_pairs() {
        let args: Args = vec![("tag", "a"), ("tag", "b")].into_iter().collect();
        assert_eq!(args.len(), 1);
        assert_eq!(args.get("tag"), Some(&json!("b")));
    }
}
