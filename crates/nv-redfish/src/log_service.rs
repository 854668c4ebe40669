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

//! Log services and their entry collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::action::ActionOutcome;
use crate::core::bmc::{Bmc, Query};
use crate::core::collection::Collection;
use crate::core::entity::{Entity, SchemaObject};
use crate::core::error::Error;
use crate::core::json::double_option;
use crate::core::odata::{ActionTarget, Link, Resource};
use crate::core::types::{Health, Status, redfish_enum};

redfish_enum! {
    pub enum OverWritePolicy {
        Unknown => "Unknown",
        WrapsWhenFull => "WrapsWhenFull",
        NeverOverWrites => "NeverOverWrites",
    }
}

redfish_enum! {
    pub enum LogEntryType {
        Event => "Event",
        Sel => "SEL",
        Oem => "Oem",
        Cxl => "CXL",
        MultipleTypes => "Multiple",
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
struct LogServiceActions {
    #[serde(rename = "#LogService.ClearLog", default)]
    clear_log: Option<ActionTarget>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LogServiceData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "ServiceEnabled",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_enabled: Option<Option<bool>>,
    #[serde(
        rename = "OverWritePolicy",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub overwrite_policy: Option<Option<OverWritePolicy>>,
    #[serde(
        rename = "MaxNumberOfRecords",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_number_of_records: Option<Option<i64>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "Entries", default)]
    entries: Link,
    #[serde(rename = "Actions", default)]
    actions: LogServiceActions,
}

impl SchemaObject for LogServiceData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type LogService<B> = Entity<B, LogServiceData>;

impl<B: Bmc> LogService<B> {
    /// Every entry in the log, across all pages.
    pub async fn entries(&self) -> Result<Vec<LogEntry<B>>, Error<B>> {
        self.collection(&self.raw().entries).await?.members().await
    }

    /// The entry collection with query parameters applied, for callers
    /// that page through large logs themselves.
    pub async fn entries_with(
        &self,
        query: &Query,
    ) -> Result<Collection<B, LogEntryData>, Error<B>> {
        self.collection_with(&self.raw().entries, Some(query)).await
    }

    /// Invoke `LogService.ClearLog`, discarding every entry.
    pub async fn clear_log(&self) -> Result<ActionOutcome, Error<B>> {
        self.invoke(
            "LogService.ClearLog",
            self.raw().actions.clear_log.as_ref(),
            &json!({}),
        )
        .await
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LogEntryData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "Created",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<Option<DateTime<Utc>>>,
    #[serde(
        rename = "EntryType",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub entry_type: Option<Option<LogEntryType>>,
    #[serde(
        rename = "Severity",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub severity: Option<Option<Health>>,
    #[serde(
        rename = "Message",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<Option<String>>,
    #[serde(
        rename = "MessageId",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_id: Option<Option<String>>,
    #[serde(rename = "MessageArgs", default, skip_serializing_if = "Vec::is_empty")]
    pub message_args: Vec<String>,
    #[serde(
        rename = "Resolution",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolution: Option<Option<String>>,
}

impl SchemaObject for LogEntryData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type LogEntry<B> = Entity<B, LogEntryData>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_log_service_decode() {
        let service: LogServiceData = serde_json::from_value(json!({
            "@odata.id": "/redfish/v1/Managers/BMC/LogServices/EventLog",
            "Id": "EventLog",
            "OverWritePolicy": "WrapsWhenFull",
            "MaxNumberOfRecords": 1000,
            "Entries": {"@odata.id": "/redfish/v1/Managers/BMC/LogServices/EventLog/Entries"},
            "Actions": {
                "#LogService.ClearLog": {
                    "target": "/redfish/v1/Managers/BMC/LogServices/EventLog/Actions/LogService.ClearLog"
                }
            }
        }))
        .unwrap();
        assert_eq!(
            service.overwrite_policy.clone().flatten(),
            Some(OverWritePolicy::WrapsWhenFull)
        );
        assert!(service.actions.clear_log.as_ref().unwrap().is_supported());
    }

    #[test]
    fn test_log_entry_decode() {
        let entry: LogEntryData = serde_json::from_value(json!({
            "@odata.id": "/redfish/v1/Managers/BMC/LogServices/EventLog/Entries/14",
            "Id": "14",
            "Created": "2026-03-18T10:35:16+00:00",
            "EntryType": "Event",
            "Severity": "Critical",
            "Message": "Temperature threshold exceeded",
            "MessageId": "Environmental.1.0.TemperatureAboveUpperCriticalThreshold",
            "MessageArgs": ["CPU1 Temp", "92"]
        }))
        .unwrap();
        assert_eq!(entry.severity.clone().flatten(), Some(Health::Critical));
        assert_eq!(entry.message_args.len(), 2);
        assert!(entry.created.clone().flatten().is_some());
    }

    #[test]
    fn test_log_entry_null_created() {
        let entry: LogEntryData =
            serde_json::from_value(json!({"Id": "1", "Created": null})).unwrap();
        assert_eq!(entry.created, Some(None));
    }
}
