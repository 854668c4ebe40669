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

//! `Event` payloads as delivered to subscribers. These arrive over the
//! subscriber's own listener, so decoding stands alone from any
//! transport.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::json::double_option;
use crate::core::odata::{Link, ODataId, Resource};
use crate::core::types::{Health, redfish_enum};

redfish_enum! {
    pub enum EventType {
        StatusChange => "StatusChange",
        ResourceUpdated => "ResourceUpdated",
        ResourceAdded => "ResourceAdded",
        ResourceRemoved => "ResourceRemoved",
        Alert => "Alert",
        MetricReport => "MetricReport",
    }
}

/// A single record inside an event payload.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventRecord {
    #[serde(
        rename = "EventId",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_id: Option<Option<String>>,
    #[serde(
        rename = "EventType",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_type: Option<Option<EventType>>,
    #[serde(
        rename = "EventTimestamp",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_timestamp: Option<Option<DateTime<Utc>>>,
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
        skip_serializing_if = "String::is_empty"
    )]
    pub message_id: String,
    #[serde(rename = "MessageArgs", default, skip_serializing_if = "Vec::is_empty")]
    pub message_args: Vec<String>,
    #[serde(rename = "OriginOfCondition", default)]
    origin_of_condition: Link,
    #[serde(rename = "LogEntry", default)]
    log_entry: Link,
}

impl EventRecord {
    /// The resource this record is about, when the service names one.
    pub fn origin_of_condition(&self) -> Option<&ODataId> {
        self.origin_of_condition.uri()
    }

    pub fn log_entry(&self) -> Option<&ODataId> {
        self.log_entry.uri()
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "Context",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub context: Option<Option<String>>,
    #[serde(rename = "Events", default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventRecord>,
    #[serde(
        rename = "Events@odata.count",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub events_count: Option<u64>,
}
