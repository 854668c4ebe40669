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

//! Tasks and the task service: the server-side record of long-running
//! work, as referenced by task monitors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::bmc::Bmc;
use crate::core::entity::{Entity, SchemaObject};
use crate::core::error::Error;
use crate::core::json::double_option;
use crate::core::odata::{Link, ODataId, Resource};
use crate::core::types::{Health, Message, Status, redfish_enum};

redfish_enum! {
    pub enum TaskState {
        New => "New",
        Starting => "Starting",
        Running => "Running",
        Suspended => "Suspended",
        Interrupted => "Interrupted",
        Pending => "Pending",
        Stopping => "Stopping",
        Completed => "Completed",
        Killed => "Killed",
        Exception => "Exception",
        Service => "Service",
        Cancelling => "Cancelling",
        Cancelled => "Cancelled",
    }
}

redfish_enum! {
    /// What happens to finished tasks when the task list fills up.
    pub enum OverwritePolicy {
        Manual => "Manual",
        Oldest => "Oldest",
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TaskData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "TaskState",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub task_state: Option<Option<TaskState>>,
    #[serde(
        rename = "TaskStatus",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub task_status: Option<Option<Health>>,
    #[serde(
        rename = "PercentComplete",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub percent_complete: Option<Option<i64>>,
    #[serde(
        rename = "StartTime",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<Option<DateTime<Utc>>>,
    #[serde(
        rename = "EndTime",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<Option<DateTime<Utc>>>,
    #[serde(rename = "Messages", default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    #[serde(rename = "TaskMonitor", default, skip_serializing_if = "Option::is_none")]
    task_monitor: Option<ODataId>,
}

impl TaskData {
    pub fn task_monitor_uri(&self) -> Option<&ODataId> {
        self.task_monitor.as_ref().filter(|uri| !uri.is_empty())
    }

    /// True once the service will not advance this task any further.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.task_state.as_ref().and_then(Option::as_ref),
            Some(
                TaskState::Completed
                    | TaskState::Killed
                    | TaskState::Exception
                    | TaskState::Cancelled
            )
        )
    }
}

impl SchemaObject for TaskData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type Task<B> = Entity<B, TaskData>;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TaskServiceData {
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
        rename = "CompletedTaskOverWritePolicy",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_task_overwrite_policy: Option<Option<OverwritePolicy>>,
    #[serde(
        rename = "LifeCycleEventOnTaskStateChange",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub life_cycle_event_on_task_state_change: Option<Option<bool>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "Tasks", default)]
    tasks: Link,
}

impl SchemaObject for TaskServiceData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type TaskService<B> = Entity<B, TaskServiceData>;

impl<B: Bmc> TaskService<B> {
    /// Every task the service currently tracks.
    pub async fn tasks(&self) -> Result<Vec<Task<B>>, Error<B>> {
        self.collection(&self.raw().tasks).await?.members().await
    }
}
