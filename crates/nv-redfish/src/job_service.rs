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

//! The job service and its jobs. Jobs are the scheduled cousin of
//! tasks; services expose one, the other, or both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::action::ActionOutcome;
use crate::core::bmc::Bmc;
use crate::core::entity::{Entity, SchemaObject};
use crate::core::error::Error;
use crate::core::json::double_option;
use crate::core::odata::{ActionTarget, Link, ODataId, Resource};
use crate::core::types::{Health, Message, Status, redfish_enum};
use crate::log_service::LogService;

redfish_enum! {
    pub enum JobState {
        New => "New",
        Starting => "Starting",
        Running => "Running",
        Suspended => "Suspended",
        Interrupted => "Interrupted",
        Pending => "Pending",
        Stopping => "Stopping",
        Completed => "Completed",
        Cancelled => "Cancelled",
        Exception => "Exception",
        Service => "Service",
        UserIntervention => "UserIntervention",
        Continue => "Continue",
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct JobServiceCapabilities {
    #[serde(
        rename = "MaxJobs",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_jobs: Option<Option<i64>>,
    #[serde(
        rename = "MaxSteps",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_steps: Option<Option<i64>>,
    #[serde(
        rename = "Scheduling",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduling: Option<Option<bool>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
struct JobServiceActions {
    #[serde(rename = "#JobService.CancelAllJobs", default)]
    cancel_all_jobs: Option<ActionTarget>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct JobServiceData {
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
        rename = "ServiceCapabilities",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub capabilities: Option<JobServiceCapabilities>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "Jobs", default)]
    jobs: Link,
    #[serde(rename = "Log", default)]
    log: Link,
    #[serde(rename = "Actions", default)]
    actions: JobServiceActions,
}

impl JobServiceData {
    pub fn jobs_uri(&self) -> Option<&ODataId> {
        self.jobs.uri()
    }

    pub fn log_uri(&self) -> Option<&ODataId> {
        self.log.uri()
    }
}

impl SchemaObject for JobServiceData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type JobService<B> = Entity<B, JobServiceData>;

impl<B: Bmc> JobService<B> {
    pub async fn jobs(&self) -> Result<Vec<Job<B>>, Error<B>> {
        self.collection(&self.raw().jobs).await?.members().await
    }

    /// The job document log, when the service keeps one.
    pub async fn log(&self) -> Result<Option<LogService<B>>, Error<B>> {
        self.follow(&self.raw().log).await
    }

    /// Invoke `JobService.CancelAllJobs`.
    pub async fn cancel_all_jobs(&self) -> Result<ActionOutcome, Error<B>> {
        self.invoke(
            "JobService.CancelAllJobs",
            self.raw().actions.cancel_all_jobs.as_ref(),
            &json!({}),
        )
        .await
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct JobData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "JobState",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_state: Option<Option<JobState>>,
    #[serde(
        rename = "JobStatus",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_status: Option<Option<Health>>,
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
}

impl JobData {
    /// Whether the job has reached a state it will not leave.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.job_state.as_ref().and_then(Option::as_ref),
            Some(JobState::Completed) | Some(JobState::Cancelled) | Some(JobState::Exception)
        )
    }
}

impl SchemaObject for JobData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type Job<B> = Entity<B, JobData>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_job_service_decode() {
        let service: JobServiceData = serde_json::from_value(json!({
            "@odata.id": "/redfish/v1/JobService",
            "Id": "JobService",
            "ServiceEnabled": true,
            "ServiceCapabilities": {"MaxJobs": 100, "Scheduling": true},
            "Jobs": {"@odata.id": "/redfish/v1/JobService/Jobs"},
            "Log": {"@odata.id": "/redfish/v1/JobService/Log"},
            "Actions": {
                "#JobService.CancelAllJobs": {
                    "target": "/redfish/v1/JobService/Actions/JobService.CancelAllJobs"
                }
            }
        }))
        .unwrap();
        assert_eq!(
            service.capabilities.as_ref().unwrap().max_jobs.flatten(),
            Some(100)
        );
        assert_eq!(
            service.jobs_uri().map(ODataId::as_str),
            Some("/redfish/v1/JobService/Jobs")
        );
        assert_eq!(
            service.log_uri().map(ODataId::as_str),
            Some("/redfish/v1/JobService/Log")
        );
        assert!(service.actions.cancel_all_jobs.is_some());
    }

    #[test]
    fn test_job_terminal_states() {
        let running: JobData =
            serde_json::from_value(json!({"Id": "7", "JobState": "Running"})).unwrap();
        assert!(!running.is_terminal());
        let done: JobData =
            serde_json::from_value(json!({"Id": "7", "JobState": "Completed"})).unwrap();
        assert!(done.is_terminal());
    }
}
