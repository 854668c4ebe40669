/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use serde_json::{Map, Value};

// Serde adapter for optional scalars that must distinguish an absent
// property from one explicitly set to null. Fields use
// `#[serde(default, with = "double_option")]`: absent decodes to None,
// null to Some(None), a value to Some(Some(v)).
pub mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer).map(Some)
    }

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(Some(inner)) => serializer.serialize_some(inner),
            _ => serializer.serialize_none(),
        }
    }
}

/// Structural equality with numeric normalization: numbers compare by
/// value regardless of integer or float form, arrays element-wise in
/// order, objects by key set and per-key value, strings byte-exact.
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(fx), Some(fy)) => fx == fy,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// The minimal PATCH body for a read/write resource: the subset of
/// `writable` keys whose current value differs from the as-received
/// image. A key that is null in one document and absent from the other
/// counts as unchanged; a key that was present and is now serialized as
/// null is an explicit clear and is emitted as null.
pub(crate) fn writable_diff(
    image: &Value,
    current: &Value,
    writable: &[&str],
) -> Map<String, Value> {
    let empty = Map::new();
    let image_map = image.as_object().unwrap_or(&empty);
    let current_map = current.as_object().unwrap_or(&empty);
    let mut diff = Map::new();
    for &key in writable {
        let before = image_map.get(key).filter(|v| !v.is_null());
        let after = current_map.get(key).filter(|v| !v.is_null());
        match (before, after) {
            (None, None) => {}
            (Some(b), Some(a)) if values_equal(b, a) => {}
            (_, Some(a)) => {
                diff.insert(key.to_owned(), a.clone());
            }
            (Some(_), None) => {
                if current_map.contains_key(key) {
                    diff.insert(key.to_owned(), Value::Null);
                }
            }
        }
    }
    diff
}
