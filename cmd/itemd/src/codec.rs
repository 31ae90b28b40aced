//! Field-by-field decoding of request payloads and encoding of items.

use std::collections::HashMap;

use itemkv::{Item, NewItem, StoreError};
use serde_json::{json, Map, Value};

/// Name and description carried by an update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: String,
    pub description: String,
}

/// Encode an item as the JSON object returned to clients.
pub fn encode_item(item: &Item) -> Value {
    json!({
        "id": item.id,
        "name": item.name,
        "description": item.description,
        "createdAt": item.created_at.to_string(),
        "updatedAt": item.updated_at.to_string(),
    })
}

pub fn encode_items(items: &[Item]) -> Value {
    Value::Array(items.iter().map(encode_item).collect())
}

/// Decode a create body: `name` required, `description` and `id` optional.
pub fn decode_create_body(body: &[u8]) -> Result<NewItem, StoreError> {
    let obj = parse_object(body)?;
    Ok(NewItem {
        id: optional_string(&obj, "id")?,
        name: required_string(&obj, "name")?,
        description: optional_string(&obj, "description")?.unwrap_or_default(),
    })
}

/// Decode an update body: `name` required, `description` optional.
pub fn decode_update_body(body: &[u8]) -> Result<ItemPatch, StoreError> {
    let obj = parse_object(body)?;
    Ok(ItemPatch {
        name: required_string(&obj, "name")?,
        description: optional_string(&obj, "description")?.unwrap_or_default(),
    })
}

/// Decode the `id`, `name` and `desc` query parameters of the GET create
/// form. `id` must be a 32-bit integer and is stored in decimal form.
pub fn decode_create_query(params: &HashMap<String, String>) -> Result<NewItem, StoreError> {
    let param = |key: &str| {
        params
            .get(key)
            .ok_or_else(|| StoreError::InvalidArgument(format!("missing query parameter {key:?}")))
    };

    let raw_id = param("id")?;
    let id: i32 = raw_id.trim().parse().map_err(|_| {
        StoreError::InvalidArgument(format!("query parameter \"id\" is not a 32-bit integer: {raw_id:?}"))
    })?;

    Ok(NewItem {
        id: Some(id.to_string()),
        name: param("name")?.clone(),
        description: param("desc")?.clone(),
    })
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, StoreError> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(obj)) => Ok(obj),
        Ok(_) => Err(StoreError::InvalidArgument(
            "request body must be a JSON object".into(),
        )),
        Err(e) => Err(StoreError::InvalidArgument(format!(
            "malformed request body: {e}"
        ))),
    }
}

fn required_string(obj: &Map<String, Value>, key: &str) -> Result<String, StoreError> {
    match optional_string(obj, key)? {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(StoreError::InvalidArgument(format!("{key} is required"))),
    }
}

fn optional_string(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, StoreError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(StoreError::InvalidArgument(format!("{key} must be a string"))),
    }
}
