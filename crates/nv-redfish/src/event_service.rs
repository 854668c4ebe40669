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

//! The event service: subscription management and test-event
//! submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::action::ActionOutcome;
use crate::core::bmc::Bmc;
use crate::core::entity::{Entity, ReadWrite, SchemaObject};
use crate::core::error::Error;
use crate::core::json::double_option;
use crate::core::odata::{ActionTarget, Link, ODataId, Resource};
use crate::core::types::{Health, Status};
use crate::event::EventType;
use crate::event_destination::{DeliveryRetryPolicy, EventDestination, EventDestinationProtocol};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
struct EventServiceActions {
    #[serde(rename = "#EventService.SubmitTestEvent", default)]
    submit_test_event: Option<ActionTarget>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventServiceData {
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
        rename = "DeliveryRetryAttempts",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_retry_attempts: Option<Option<i64>>,
    #[serde(
        rename = "DeliveryRetryIntervalSeconds",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_retry_interval_seconds: Option<Option<i64>>,
    #[serde(
        rename = "EventTypesForSubscription",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub event_types_for_subscription: Vec<EventType>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "Subscriptions", default)]
    subscriptions: Link,
    #[serde(rename = "Actions", default)]
    actions: EventServiceActions,
}

impl SchemaObject for EventServiceData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

impl ReadWrite for EventServiceData {
    const WRITABLE: &'static [&'static str] = &[
        "ServiceEnabled",
        "DeliveryRetryAttempts",
        "DeliveryRetryIntervalSeconds",
    ];
}

pub type EventService<B> = Entity<B, EventServiceData>;

impl<B: Bmc> EventService<B> {
    pub async fn subscriptions(&self) -> Result<Vec<EventDestination<B>>, Error<B>> {
        self.collection(&self.raw().subscriptions).await?.members().await
    }

    /// Register a subscriber by POSTing to the subscription collection.
    /// Returns the new subscription's URI.
    pub async fn subscribe(&self, request: &SubscriptionRequest) -> Result<ODataId, Error<B>> {
        let Some(uri) = self.raw().subscriptions.uri() else {
            return Err(Error::NotSupported("event subscriptions".to_owned()));
        };
        let payload = serde_json::to_value(request)
            .map_err(|err| Error::InvalidArgument(format!("subscription request: {err}")))?;
        let response = self.post_json(uri.as_str(), &payload).await?;
        // Location is the norm; fall back to a body with @odata.id.
        response
            .location()
            .or_else(|| {
                response
                    .json::<Resource>()
                    .ok()
                    .map(|resource| resource.odata_id)
                    .filter(|uri| !uri.is_empty())
            })
            .ok_or_else(|| Error::NotFound("subscription location".to_owned()))
    }

    /// Invoke `EventService.SubmitTestEvent`, asking the service to
    /// deliver a synthetic event to every subscriber.
    pub async fn submit_test_event(&self, event: &TestEvent) -> Result<ActionOutcome, Error<B>> {
        let payload = serde_json::to_value(event)
            .map_err(|err| Error::InvalidArgument(format!("test event: {err}")))?;
        self.invoke(
            "EventService.SubmitTestEvent",
            self.raw().actions.submit_test_event.as_ref(),
            &payload,
        )
        .await
    }
}

/// Body for a new subscription. Fields left empty are omitted so the
/// service applies its own defaults.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SubscriptionRequest {
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Protocol", skip_serializing_if = "Option::is_none")]
    pub protocol: Option<EventDestinationProtocol>,
    #[serde(rename = "Context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(rename = "EventTypes", skip_serializing_if = "Vec::is_empty")]
    pub event_types: Vec<EventType>,
    #[serde(rename = "RegistryPrefixes", skip_serializing_if = "Vec::is_empty")]
    pub registry_prefixes: Vec<String>,
    #[serde(rename = "ResourceTypes", skip_serializing_if = "Vec::is_empty")]
    pub resource_types: Vec<String>,
    #[serde(rename = "DeliveryRetryPolicy", skip_serializing_if = "Option::is_none")]
    pub delivery_retry_policy: Option<DeliveryRetryPolicy>,
}

/// Payload for `EventService.SubmitTestEvent`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TestEvent {
    #[serde(rename = "MessageId")]
    pub message_id: String,
    #[serde(rename = "Message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "MessageArgs", skip_serializing_if = "Vec::is_empty")]
    pub message_args: Vec<String>,
    #[serde(rename = "EventType", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(rename = "EventId", skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(rename = "EventTimestamp", skip_serializing_if = "Option::is_none")]
    pub event_timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "Severity", skip_serializing_if = "Option::is_none")]
    pub severity: Option<Health>,
    #[serde(rename = "OriginOfCondition", skip_serializing_if = "Option::is_none")]
    pub origin_of_condition: Option<String>,
}
