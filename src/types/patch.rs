//! Field semantics for partial updates.
//!
//! Patch payloads need three states per nullable field: absent (leave the
//! stored value alone), explicit null (clear it) and a concrete value.

use serde::{Deserialize, Deserializer};

/// Deserialize into `Option<Option<T>>` so that an absent field stays
/// `None` (via `#[serde(default)]`) while an explicit JSON null becomes
/// `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
