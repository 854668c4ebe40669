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

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical URI of a resource, as the service returned it. Opaque:
/// trailing slashes are preserved and no normalization beyond trimming
/// surrounding whitespace is performed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ODataId(String);

impl ODataId {
    pub fn new(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let trimmed = uri.trim();
        if trimmed.len() == uri.len() {
            Self(uri)
        } else {
            Self(trimmed.to_owned())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ODataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ODataId {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for ODataId {
    fn from(uri: String) -> Self {
        Self::new(uri)
    }
}

impl PartialEq<str> for ODataId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ODataId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for ODataId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ODataId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ODataId::new)
    }
}

#[derive(Deserialize)]
struct LinkEnvelope {
    #[serde(rename = "@odata.id", default)]
    odata_id: Option<String>,
    // Pre-1.0 services emitted href instead of @odata.id.
    #[serde(default)]
    href: Option<String>,
}

impl LinkEnvelope {
    fn into_uri(self) -> Option<ODataId> {
        self.odata_id
            .or(self.href)
            .map(ODataId::new)
            .filter(|uri| !uri.is_empty())
    }
}

/// A single reference to another resource. Absent objects, missing
/// `@odata.id` keys, nulls, and empty URIs all decode to the empty link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Link(Option<ODataId>);

impl Link {
    pub fn new(uri: impl Into<ODataId>) -> Self {
        let uri = uri.into();
        if uri.is_empty() {
            Self(None)
        } else {
            Self(Some(uri))
        }
    }

    pub fn uri(&self) -> Option<&ODataId> {
        self.0.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let envelope = Option::<LinkEnvelope>::deserialize(deserializer)?;
        Ok(Link(envelope.and_then(LinkEnvelope::into_uri)))
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            None => serializer.serialize_none(),
            Some(uri) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("@odata.id", uri)?;
                map.end()
            }
        }
    }
}

/// An ordered list of resource URIs. Services have been observed to emit
/// link lists in three shapes: an array of link objects, an array of
/// plain URI strings, and a collection-style object with a `Members`
/// array. All three decode here; entries without a usable URI are
/// dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkList(Vec<ODataId>);

impl LinkList {
    pub fn uris(&self) -> &[ODataId] {
        &self.0
    }

    pub fn into_uris(self) -> Vec<ODataId> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ODataId> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for LinkList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Entry {
            Uri(String),
            Object(LinkEnvelope),
        }

        impl Entry {
            fn into_uri(self) -> Option<ODataId> {
                match self {
                    Entry::Uri(uri) => {
                        let uri = ODataId::new(uri);
                        (!uri.is_empty()).then_some(uri)
                    }
                    Entry::Object(envelope) => envelope.into_uri(),
                }
            }
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            List(Vec<Entry>),
            Collection {
                #[serde(rename = "Members", default)]
                members: Vec<Entry>,
            },
        }

        let entries = match Option::<Shape>::deserialize(deserializer)? {
            None => Vec::new(),
            Some(Shape::List(entries)) => entries,
            Some(Shape::Collection { members }) => members,
        };
        Ok(LinkList(
            entries.into_iter().filter_map(Entry::into_uri).collect(),
        ))
    }
}

impl Serialize for LinkList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|uri| {
            let mut map = serde_json::Map::new();
            map.insert("@odata.id".to_owned(), serde_json::Value::String(uri.as_str().to_owned()));
            serde_json::Value::Object(map)
        }))
    }
}

/// Action endpoint extracted from a resource's `Actions` object. A
/// missing or empty `target` means the service does not implement the
/// action on this resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ActionTarget {
    #[serde(rename = "target", default)]
    target: Option<ODataId>,
    #[serde(rename = "@Redfish.ActionInfo", default)]
    action_info: Option<ODataId>,
}

impl ActionTarget {
    pub fn target(&self) -> Option<&ODataId> {
        self.target.as_ref().filter(|uri| !uri.is_empty())
    }

    pub fn action_info(&self) -> Option<&ODataId> {
        self.action_info.as_ref().filter(|uri| !uri.is_empty())
    }

    pub fn is_supported(&self) -> bool {
        self.target().is_some()
    }
}

impl Serialize for ActionTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = usize::from(self.target.is_some()) + usize::from(self.action_info.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(target) = &self.target {
            map.serialize_entry("target", target)?;
        }
        if let Some(info) = &self.action_info {
            map.serialize_entry("@Redfish.ActionInfo", info)?;
        }
        map.end()
    }
}

/// Sidecar properties common to every schema record, flattened into each
/// one at its top level.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Resource {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: ODataId,
    #[serde(rename = "@odata.type", default, skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    #[serde(rename = "@odata.context", default, skip_serializing_if = "Option::is_none")]
    pub odata_context: Option<String>,
    #[serde(rename = "@odata.etag", default, skip_serializing_if = "Option::is_none")]
    pub odata_etag: Option<String>,
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Vendor extensions, passed through untouched.
    #[serde(rename = "Oem", default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn link(value: serde_json::Value) -> Link {
        serde_json::from_value(value).unwrap()
    }

    fn link_list(value: serde_json::Value) -> LinkList {
        serde_json::from_value(value).unwrap()
    }

    // -- Link --

    #[test]
    fn test_link_object() {
        assert_eq!(
            link(json!({"@odata.id": "/redfish/v1/Systems"})).uri(),
            Some(&ODataId::new("/redfish/v1/Systems"))
        );
    }

    #[test]
    fn test_link_trims_whitespace() {
        assert_eq!(
            link(json!({"@odata.id": " /redfish/v1/Systems "})).uri(),
            Some(&ODataId::new("/redfish/v1/Systems"))
        );
    }

    #[test]
    fn test_link_preserves_trailing_slash() {
        assert_eq!(link(json!({"@odata.id": "/redfish/v1/"})).uri(), Some(&ODataId::new("/redfish/v1/")));
    }

    #[test]
    fn test_link_null_and_empty() {
        assert!(link(json!(null)).is_empty());
        assert!(link(json!({})).is_empty());
        assert!(link(json!({"@odata.id": ""})).is_empty());
    }

    #[test]
    fn test_link_href_fallback() {
        assert_eq!(
            link(json!({"href": "/redfish/v1/Chassis/1"})).uri(),
            Some(&ODataId::new("/redfish/v1/Chassis/1"))
        );
    }

    #[test]
    fn test_link_serializes_as_object() {
        let value = serde_json::to_value(Link::new("/redfish/v1/Systems")).unwrap();
        assert_eq!(value, json!({"@odata.id": "/redfish/v1/Systems"}));
    }

    // -- LinkList --

    #[test]
    fn test_link_list_of_objects() {
        let list = link_list(json!([{"@odata.id": "/a"}, {"@odata.id": "/b"}]));
        assert_eq!(list.uris(), &[ODataId::new("/a"), ODataId::new("/b")]);
    }

    #[test]
    fn test_link_list_of_strings() {
        let list = link_list(json!(["/a", "/b"]));
        assert_eq!(list.len(), 2);
        assert_eq!(list.uris()[1], "/b");
    }

    #[test]
    fn test_link_list_members_object() {
        let list = link_list(json!({
            "Members": [{"@odata.id": "/a"}],
            "Members@odata.count": 1
        }));
        assert_eq!(list.uris(), &[ODataId::new("/a")]);
    }

    #[test]
    fn test_link_list_preserves_order() {
        let list = link_list(json!([{"@odata.id": "/3"}, {"@odata.id": "/1"}, {"@odata.id": "/2"}]));
        assert_eq!(list.uris(), &[ODataId::new("/3"), ODataId::new("/1"), ODataId::new("/2")]);
    }

    #[test]
    fn test_link_list_absent_and_null() {
        assert!(link_list(json!(null)).is_empty());
        assert!(link_list(json!([])).is_empty());
    }

    // -- ActionTarget --

    #[test]
    fn test_action_target_with_info() {
        let target: ActionTarget = serde_json::from_value(json!({
            "target": "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset",
            "@Redfish.ActionInfo": "/redfish/v1/Systems/1/ResetActionInfo"
        }))
        .unwrap();
        assert!(target.is_supported());
        assert_eq!(
            target.action_info().map(ODataId::as_str),
            Some("/redfish/v1/Systems/1/ResetActionInfo")
        );
    }

    #[test]
    fn test_action_target_without_target_is_unsupported() {
        let target: ActionTarget =
            serde_json::from_value(json!({"@Redfish.ActionInfo": "/info"})).unwrap();
        assert!(!target.is_supported());
    }

    // -- Resource --

    #[test]
    fn test_resource_sidecar_fields() {
        let resource: Resource = serde_json::from_value(json!({
            "@odata.id": "/redfish/v1/Systems/1",
            "@odata.type": "#ComputerSystem.v1_20_1.ComputerSystem",
            "@odata.etag": "\"W/12345\"",
            "Id": "1",
            "Name": "System One",
            "Unknown": {"ignored": true}
        }))
        .unwrap();
        assert_eq!(resource.odata_id, "/redfish/v1/Systems/1");
        assert_eq!(resource.odata_etag.as_deref(), Some("\"W/12345\""));
        assert_eq!(resource.id, "1");
    }
}
