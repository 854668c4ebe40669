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

//! Schema-independent machinery: the transport trait, the entity binder
//! and updater, collections, actions, links, and the common value types.

pub mod action;
pub mod bmc;
pub mod collection;
pub mod entity;
pub mod error;
pub(crate) mod json;
pub mod odata;
pub mod types;

pub use action::{ActionOutcome, RetryAfter, TaskMonitor};
pub use bmc::{Bmc, MultipartPart, Query, Response};
pub use collection::Collection;
pub use entity::{Entity, EntityTypeRef, ReadWrite, SchemaObject};
pub use error::{Error, ServiceError};
pub use odata::{ActionTarget, Link, LinkList, ODataId, Resource};
pub use types::{Health, Message, PowerState, ResetType, State, Status, ToSnakeCase};
