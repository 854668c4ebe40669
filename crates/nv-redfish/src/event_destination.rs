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

//! `EventDestination`: one subscriber registration under the event
//! service. Delete the entity to unsubscribe.

use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, ReadWrite, SchemaObject};
use crate::core::json::double_option;
use crate::core::odata::{LinkList, Resource};
use crate::core::types::{Status, redfish_enum};
use crate::event::EventType;

redfish_enum! {
    pub enum EventDestinationProtocol {
        Redfish => "Redfish",
        SnmpV1 => "SNMPv1",
        SnmpV2c => "SNMPv2c",
        SnmpV3 => "SNMPv3",
        Smtp => "SMTP",
        SyslogTls => "SyslogTLS",
        SyslogTcp => "SyslogTCP",
        SyslogUdp => "SyslogUDP",
        Oem => "OEM",
    }
}

redfish_enum! {
    pub enum DeliveryRetryPolicy {
        TerminateAfterRetries => "TerminateAfterRetries",
        SuspendRetries => "SuspendRetries",
        RetryForever => "RetryForever",
        RetryForeverWithBackoff => "RetryForeverWithBackoff",
    }
}

redfish_enum! {
    pub enum SubscriptionType {
        RedfishEvent => "RedfishEvent",
        Sse => "SSE",
        SnmpTrap => "SNMPTrap",
        SnmpInform => "SNMPInform",
        Syslog => "Syslog",
        Oem => "OEM",
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventDestinationData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "Destination",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination: Option<Option<String>>,
    #[serde(
        rename = "Context",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub context: Option<Option<String>>,
    #[serde(
        rename = "Protocol",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub protocol: Option<Option<EventDestinationProtocol>>,
    #[serde(
        rename = "SubscriptionType",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub subscription_type: Option<Option<SubscriptionType>>,
    #[serde(
        rename = "DeliveryRetryPolicy",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_retry_policy: Option<Option<DeliveryRetryPolicy>>,
    #[serde(
        rename = "VerifyCertificate",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub verify_certificate: Option<Option<bool>>,
    #[serde(rename = "EventTypes", default, skip_serializing_if = "Vec::is_empty")]
    pub event_types: Vec<EventType>,
    #[serde(
        rename = "RegistryPrefixes",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub registry_prefixes: Vec<String>,
    #[serde(rename = "ResourceTypes", default, skip_serializing_if = "Vec::is_empty")]
    pub resource_types: Vec<String>,
    #[serde(rename = "OriginResources", default)]
    origin_resources: LinkList,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl EventDestinationData {
    /// Resources this subscription is scoped to. Empty means all.
    pub fn origin_resources(&self) -> &LinkList {
        &self.origin_resources
    }
}

impl SchemaObject for EventDestinationData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

impl ReadWrite for EventDestinationData {
    const WRITABLE: &'static [&'static str] =
        &["Context", "DeliveryRetryPolicy", "VerifyCertificate"];
}

pub type EventDestination<B> = Entity<B, EventDestinationData>;
