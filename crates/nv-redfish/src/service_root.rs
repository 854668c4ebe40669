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

//! The service root, entry point for everything else. One GET binds
//! it; every subtree hangs off the links it advertises.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chassis::ChassisData;
use crate::computer_system::ComputerSystemData;
use crate::core::bmc::{Bmc, Query};
use crate::core::collection::Collection;
use crate::core::entity::{Entity, SchemaObject};
use crate::core::error::Error;
use crate::core::json::double_option;
use crate::core::odata::{Link, ODataId, Resource};
use crate::event_service::EventService;
use crate::job_service::JobService;
use crate::manager::ManagerData;
use crate::message_registry::{self, MessageRegistryFileData, RegistryMessage};
use crate::task::TaskService;
use crate::telemetry_service::TelemetryService;
use crate::update_service::UpdateService;

/// Where almost every service mounts its root.
pub const DEFAULT_SERVICE_ROOT: &str = "/redfish/v1/";

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
struct ServiceRootLinks {
    #[serde(rename = "Sessions", default)]
    sessions: Link,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ServiceRootData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "RedfishVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub redfish_version: Option<String>,
    #[serde(
        rename = "UUID",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub uuid: Option<Option<String>>,
    #[serde(
        rename = "Vendor",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub vendor: Option<Option<String>>,
    #[serde(
        rename = "Product",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub product: Option<Option<String>>,
    #[serde(rename = "Systems", default)]
    systems: Link,
    #[serde(rename = "Chassis", default)]
    chassis: Link,
    #[serde(rename = "Managers", default)]
    managers: Link,
    #[serde(rename = "UpdateService", default)]
    update_service: Link,
    #[serde(rename = "EventService", default)]
    event_service: Link,
    #[serde(rename = "Tasks", default)]
    tasks: Link,
    #[serde(rename = "JobService", default)]
    job_service: Link,
    #[serde(rename = "TelemetryService", default)]
    telemetry_service: Link,
    #[serde(rename = "Registries", default)]
    registries: Link,
    #[serde(rename = "Links", default)]
    links: ServiceRootLinks,
}

impl ServiceRootData {
    /// URI of the session collection, for callers that establish their
    /// own session tokens before handing this library the credentials.
    pub fn sessions_uri(&self) -> Option<&ODataId> {
        self.links.sessions.uri()
    }
}

impl SchemaObject for ServiceRootData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type ServiceRoot<B> = Entity<B, ServiceRootData>;

impl<B: Bmc> ServiceRoot<B> {
    /// Bind the service root at its standard location.
    pub async fn new(bmc: Arc<B>) -> Result<Self, Error<B>> {
        Entity::fetch(bmc, DEFAULT_SERVICE_ROOT).await
    }

    /// Bind a service root mounted somewhere unusual.
    pub async fn at(bmc: Arc<B>, uri: &str) -> Result<Self, Error<B>> {
        Entity::get(bmc, uri).await
    }

    pub async fn systems(&self) -> Result<Collection<B, ComputerSystemData>, Error<B>> {
        self.collection(&self.raw().systems).await
    }

    /// The systems collection with query parameters applied. Services
    /// that ignore paging parameters still return the full collection.
    pub async fn systems_with(
        &self,
        query: &Query,
    ) -> Result<Collection<B, ComputerSystemData>, Error<B>> {
        self.collection_with(&self.raw().systems, Some(query)).await
    }

    pub async fn chassis(&self) -> Result<Collection<B, ChassisData>, Error<B>> {
        self.collection(&self.raw().chassis).await
    }

    pub async fn managers(&self) -> Result<Collection<B, ManagerData>, Error<B>> {
        self.collection(&self.raw().managers).await
    }

    pub async fn update_service(&self) -> Result<Option<UpdateService<B>>, Error<B>> {
        self.follow(&self.raw().update_service).await
    }

    pub async fn event_service(&self) -> Result<Option<EventService<B>>, Error<B>> {
        self.follow(&self.raw().event_service).await
    }

    pub async fn task_service(&self) -> Result<Option<TaskService<B>>, Error<B>> {
        self.follow(&self.raw().tasks).await
    }

    pub async fn job_service(&self) -> Result<Option<JobService<B>>, Error<B>> {
        self.follow(&self.raw().job_service).await
    }

    pub async fn telemetry_service(&self) -> Result<Option<TelemetryService<B>>, Error<B>> {
        self.follow(&self.raw().telemetry_service).await
    }

    pub async fn registries(&self) -> Result<Collection<B, MessageRegistryFileData>, Error<B>> {
        self.collection(&self.raw().registries).await
    }

    /// Resolve a `MessageId` against the registries this service hosts.
    pub async fn message(
        &self,
        message_id: &str,
        language: &str,
    ) -> Result<RegistryMessage, Error<B>> {
        let registries = self.registries().await?;
        message_registry::resolve(self.bmc(), registries, message_id, language).await
    }
}
