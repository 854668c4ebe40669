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

//! Client-side object model for Redfish and Swordfish management
//! services.
//!
//! The model mirrors the service's resource tree. Bind a
//! [`ServiceRoot`] over any [`core::Bmc`] transport, then walk typed
//! links downward; every hop is a lazy GET and nothing is cached.
//! Entities remember the exact JSON they were bound from, so
//! [`core::Entity::update`] sends only the writable properties that
//! actually changed, guarded by `If-Match` when the service hands out
//! ETags.
//!
//! [`bmc_http`] provides the shipped HTTP transport; anything
//! implementing [`core::Bmc`] works in its place.

pub mod action_info;
pub mod bmc_http;
pub mod chassis;
pub mod computer_system;
pub mod core;
pub mod environment_metrics;
pub mod event;
pub mod event_destination;
pub mod event_service;
pub mod job_service;
pub mod log_service;
pub mod manager;
pub mod message_registry;
pub mod sensor;
pub mod service_root;
pub mod task;
pub mod telemetry_service;
pub mod update_service;

pub use crate::core::error::{Error, ServiceError};
pub use crate::service_root::{DEFAULT_SERVICE_ROOT, ServiceRoot};
