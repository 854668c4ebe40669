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

//! Message registries: the lookup tables that turn a `MessageId` like
//! `Environmental.1.0.TemperatureAboveUpperCriticalThreshold` into
//! human-readable text.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::bmc::Bmc;
use crate::core::collection::Collection;
use crate::core::entity::{Entity, SchemaObject};
use crate::core::error::Error;
use crate::core::json::double_option;
use crate::core::odata::{ODataId, Resource};
use crate::core::types::Health;

/// One translation of a registry, pointing at where its content lives.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RegistryLocation {
    #[serde(rename = "Language", default)]
    pub language: String,
    #[serde(rename = "Uri", default, skip_serializing_if = "Option::is_none")]
    uri: Option<ODataId>,
    #[serde(rename = "ArchiveUri", default, skip_serializing_if = "Option::is_none")]
    pub archive_uri: Option<ODataId>,
    #[serde(
        rename = "PublicationUri",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub publication_uri: Option<String>,
}

impl RegistryLocation {
    /// The service-local URI of the registry content, when it is hosted
    /// directly rather than archived or published externally.
    pub fn uri(&self) -> Option<&ODataId> {
        self.uri.as_ref().filter(|uri| !uri.is_empty())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MessageRegistryFileData {
    #[serde(flatten)]
    pub base: Resource,
    /// `Prefix.Major.Minor` of the registry this file describes.
    #[serde(rename = "Registry", default)]
    pub registry: String,
    #[serde(rename = "Languages", default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(rename = "Location", default, skip_serializing_if = "Vec::is_empty")]
    pub location: Vec<RegistryLocation>,
}

impl MessageRegistryFileData {
    /// The location entry for `language`, falling back to the entry
    /// marked `default`. Language tags compare case-insensitively.
    pub fn location_for(&self, language: &str) -> Option<&RegistryLocation> {
        self.location
            .iter()
            .find(|location| location.language.eq_ignore_ascii_case(language))
            .or_else(|| {
                self.location
                    .iter()
                    .find(|location| location.language.eq_ignore_ascii_case("default"))
            })
    }
}

impl SchemaObject for MessageRegistryFileData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type MessageRegistryFile<B> = Entity<B, MessageRegistryFileData>;

/// One message definition inside a registry.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RegistryMessage {
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(
        rename = "Severity",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub severity: Option<Option<Health>>,
    #[serde(
        rename = "MessageSeverity",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_severity: Option<Option<Health>>,
    #[serde(
        rename = "NumberOfArgs",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub number_of_args: Option<Option<i64>>,
    #[serde(rename = "ParamTypes", default, skip_serializing_if = "Vec::is_empty")]
    pub param_types: Vec<String>,
    #[serde(rename = "Resolution", default)]
    pub resolution: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MessageRegistryData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(rename = "RegistryPrefix", default)]
    pub registry_prefix: String,
    #[serde(rename = "RegistryVersion", default)]
    pub registry_version: String,
    #[serde(rename = "OwningEntity", default, skip_serializing_if = "String::is_empty")]
    pub owning_entity: String,
    #[serde(rename = "Messages", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<String, RegistryMessage>,
}

impl SchemaObject for MessageRegistryData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type MessageRegistry<B> = Entity<B, MessageRegistryData>;

fn split_message_id(message_id: &str) -> Option<(&str, &str, &str, &str)> {
    let parts: Vec<&str> = message_id.split('.').collect();
    match parts.as_slice() {
        [prefix, major, minor, key]
            if !prefix.is_empty() && !major.is_empty() && !minor.is_empty() && !key.is_empty() =>
        {
            Some((prefix, major, minor, key))
        }
        _ => None,
    }
}

/// `1.0` matches `1.0` and `1.0.2`, never `1.01` or `1.0.2-oem`.
fn version_matches(registry_version: &str, wanted: &str) -> bool {
    registry_version == wanted
        || registry_version
            .strip_prefix(wanted)
            .is_some_and(|rest| rest.starts_with('.'))
}

fn registry_covers_prefix(registry: &str, prefix: &str) -> bool {
    registry == prefix
        || registry
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Walk the registry file collection and look up `message_id`. Files
/// are pre-filtered on their advertised `Registry` prefix so only
/// plausible registries are fetched.
pub(crate) async fn resolve<B: Bmc>(
    bmc: &Arc<B>,
    registry_files: Collection<B, MessageRegistryFileData>,
    message_id: &str,
    language: &str,
) -> Result<RegistryMessage, Error<B>> {
    let message_id = message_id.trim();
    if message_id.is_empty() {
        return Err(Error::InvalidArgument("message id is empty".to_owned()));
    }
    let Some((prefix, major, minor, key)) = split_message_id(message_id) else {
        return Err(Error::InvalidArgument(format!(
            "malformed message id {message_id}, expected Prefix.Major.Minor.MessageKey"
        )));
    };
    let version = format!("{major}.{minor}");

    for file in registry_files.members().await? {
        let data = file.raw();
        if !data.registry.is_empty() && !registry_covers_prefix(&data.registry, prefix) {
            continue;
        }
        let Some(uri) = data.location_for(language).and_then(RegistryLocation::uri) else {
            continue;
        };
        let registry: MessageRegistry<B> = Entity::get(Arc::clone(bmc), uri.as_str()).await?;
        let content = registry.raw();
        if content.registry_prefix != prefix
            || !version_matches(&content.registry_version, &version)
        {
            continue;
        }
        if let Some(message) = content.messages.get(key) {
            tracing::debug!(message_id, registry = %registry.uri(), "resolved message");
            return Ok(message.clone());
        }
    }
    Err(Error::NotFound(format!("message {message_id}")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_registry_file_decode() {
        let file: MessageRegistryFileData = serde_json::from_value(json!({
            "@odata.id": "/redfish/v1/Registries/Environmental",
            "Id": "Environmental",
            "Registry": "Environmental.1.0",
            "Languages": ["en"],
            "Location": [{
                "Language": "en",
                "Uri": "/redfish/v1/Registries/Environmental/Environmental.1.0.1.json"
            }]
        }))
        .unwrap();
        assert_eq!(file.registry, "Environmental.1.0");
        let location = file.location_for("en").unwrap();
        assert_eq!(
            location.uri().map(ODataId::as_str),
            Some("/redfish/v1/Registries/Environmental/Environmental.1.0.1.json")
        );
    }

    #[test]
    fn test_location_falls_back_to_default_language() {
        let file: MessageRegistryFileData = serde_json::from_value(json!({
            "Id": "Base",
            "Location": [
                {"Language": "default", "Uri": "/redfish/v1/Registries/Base/Base.json"},
                {"Language": "fr", "Uri": "/redfish/v1/Registries/Base/Base.fr.json"}
            ]
        }))
        .unwrap();
        assert_eq!(file.location_for("fr").unwrap().language, "fr");
        assert_eq!(file.location_for("en").unwrap().language, "default");
        assert_eq!(file.location_for("EN").unwrap().language, "default");
    }

    #[test]
    fn test_location_without_match_or_default() {
        let file: MessageRegistryFileData = serde_json::from_value(json!({
            "Id": "Base",
            "Location": [{"Language": "fr", "Uri": "/fr.json"}]
        }))
        .unwrap();
        assert!(file.location_for("en").is_none());
    }

    #[test]
    fn test_registry_decode() {
        let registry: MessageRegistryData = serde_json::from_value(json!({
            "Id": "Environmental.1.0.1",
            "RegistryPrefix": "Environmental",
            "RegistryVersion": "1.0.1",
            "Messages": {
                "TemperatureAboveUpperCriticalThreshold": {
                    "Description": "Indicates that a temperature reading is above the upper critical threshold.",
                    "Message": "Temperature '%1' reading of %2 degrees (C) is above the %3 upper critical threshold.",
                    "MessageSeverity": "Critical",
                    "NumberOfArgs": 3,
                    "ParamTypes": ["string", "number", "number"],
                    "Resolution": "Check the condition of the resource."
                }
            }
        }))
        .unwrap();
        let message = &registry.messages["TemperatureAboveUpperCriticalThreshold"];
        assert_eq!(message.number_of_args.flatten(), Some(3));
        assert_eq!(message.message_severity.clone().flatten(), Some(Health::Critical));
    }

    #[test]
    fn test_split_message_id() {
        assert_eq!(
            split_message_id("Environmental.1.0.TemperatureAboveUpperCriticalThreshold"),
            Some(("Environmental", "1", "0", "TemperatureAboveUpperCriticalThreshold"))
        );
        assert_eq!(split_message_id("Base.Success"), None);
        assert_eq!(split_message_id("Base..0.Success"), None);
        assert_eq!(split_message_id("Base.1.0.Success.Extra"), None);
    }

    #[test]
    fn test_version_matching_is_segment_aware() {
        assert!(version_matches("1.0", "1.0"));
        assert!(version_matches("1.0.2", "1.0"));
        assert!(!version_matches("1.01", "1.0"));
        assert!(!version_matches("1.10.0", "1.1"));
    }

    #[test]
    fn test_registry_prefix_cover() {
        assert!(registry_covers_prefix("Environmental.1.0", "Environmental"));
        assert!(registry_covers_prefix("Environmental", "Environmental"));
        assert!(!registry_covers_prefix("EnvironmentalOem.1.0", "Environmental"));
    }
}
