//! Layered document merge.
//!
//! A layer is serialized to JSON with unset fields skipped, then folded into
//! the accumulated value: objects merge key by key, everything else that the
//! layer states replaces what was there. Fields a layer leaves unset never
//! overwrite anything.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::error::ConfigError;

/// Merge `src` into `dst`, with `src` winning wherever it sets a value.
///
/// # Errors
///
/// Returns `ConfigError::Merge` if either value cannot round-trip through
/// JSON.
pub fn json_merge_struct<T>(dst: &mut T, src: &T) -> Result<(), ConfigError>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = serde_json::to_value(&*dst)?;
    merge_value(&mut merged, serde_json::to_value(src)?);
    *dst = serde_json::from_value(merged)?;
    Ok(())
}

fn merge_value(dst: &mut Value, src: Value) {
    match (dst, src) {
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (key, value) in src_map {
                match dst_map.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        dst_map.insert(key, value);
                    }
                }
            }
        }
        (_, Value::Null) => {}
        (dst, src) => *dst = src,
    }
}
