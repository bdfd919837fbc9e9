use std::{collections::HashSet, fmt};

use serde::Serialize;
use serde_json::Value;

use crate::errors::ServiceError;

pub use configs::ItemMode;

/// Caller-supplied wishlist identifier: trimmed, non-empty, case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Trim `raw` and reject it when nothing is left.
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::list_id_required());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn into_inner(self) -> String { self.0 }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a JSON value as text: strings as-is, `null` as empty, anything else
/// as its compact JSON form. The result is trimmed.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Text of a body `list_id`. Falsy values (`null`, `false`, `0`, `""`) read as
/// empty; objects read as `[object Object]` and arrays as their comma-joined
/// elements.
pub fn coerce_list_id(value: &Value) -> String {
    let falsy = match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
    if falsy {
        return String::new();
    }
    script_text(value).trim().to_string()
}

fn script_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items.iter().map(script_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// `items` from a request body; anything but an array becomes an empty list.
pub fn items_from_value(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Apply the item policy of `mode` to a sequence about to be stored.
pub fn normalize_items(mode: ItemMode, items: Vec<Value>) -> Vec<Value> {
    match mode {
        ItemMode::Opaque => items,
        ItemMode::UniqueIds => {
            let mut seen = HashSet::with_capacity(items.len());
            items
                .iter()
                .map(coerce_text)
                .filter(|id| !id.is_empty())
                .filter(|id| seen.insert(id.clone()))
                .map(Value::String)
                .collect()
        }
    }
}
