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

use std::time::Duration;

use chrono::{DateTime, Utc};
use http::HeaderMap;

use crate::core::bmc::Response;
use crate::core::odata::ODataId;
use crate::task::TaskData;

/// Parsed `Retry-After` header, either of its two RFC 9110 forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RetryAfter {
    Delay(Duration),
    At(DateTime<Utc>),
}

fn parse_retry_after(headers: &HeaderMap) -> Option<RetryAfter> {
    let value = headers.get(http::header::RETRY_AFTER)?.to_str().ok()?.trim();
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(RetryAfter::Delay(Duration::from_secs(seconds)));
    }
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|at| RetryAfter::At(at.with_timezone(&Utc)))
}

/// Handle for an asynchronously accepted action. Polling it is the
/// caller's business; this library only captures what the 202 carried.
#[derive(Clone, Debug)]
pub struct TaskMonitor {
    /// URI from the `Location` header. Empty when the service omitted
    /// the header.
    pub uri: ODataId,
    pub status: http::StatusCode,
    pub headers: HeaderMap,
    pub retry_after: Option<RetryAfter>,
    /// Task resource from the 202 body, when the service included one.
    pub task: Option<TaskData>,
}

impl TaskMonitor {
    fn from_response(response: &Response) -> Self {
        Self {
            uri: response.location().unwrap_or_default(),
            status: response.status,
            retry_after: parse_retry_after(&response.headers),
            task: if response.body.is_empty() {
                None
            } else {
                response.json::<TaskData>().ok()
            },
            headers: response.headers.clone(),
        }
    }
}

/// How the service disposed of an action request.
#[derive(Clone, Debug)]
pub enum ActionOutcome {
    /// Synchronous success (200, 204, or any other success status).
    Completed(Response),
    /// 201 with the URI of the resource the action created.
    Created { location: ODataId, response: Response },
    /// 202; the work continues behind a task monitor.
    Accepted(TaskMonitor),
}

impl ActionOutcome {
    pub(crate) fn from_response(response: Response) -> Self {
        match response.status.as_u16() {
            202 => ActionOutcome::Accepted(TaskMonitor::from_response(&response)),
            201 => ActionOutcome::Created {
                location: response.location().unwrap_or_default(),
                response,
            },
            _ => ActionOutcome::Completed(response),
        }
    }

    /// The task monitor, when the action was accepted asynchronously.
    pub fn task_monitor(&self) -> Option<&TaskMonitor> {
        match self {
            ActionOutcome::Accepted(monitor) => Some(monitor),
            _ => None,
        }
    }

    pub fn response(&self) -> Option<&Response> {
        match self {
            ActionOutcome::Completed(response) => Some(response),
            ActionOutcome::Created { response, .. } => Some(response),
            ActionOutcome::Accepted(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::StatusCode;

    use super::*;

    fn response(status: StatusCode, headers: &[(&str, &str)], body: &str) -> Response {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                http::HeaderName::try_from(*name).unwrap(),
                value.parse().unwrap(),
            );
        }
        Response {
            status,
            headers: map,
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    #[test]
    fn test_synchronous_success() {
        let outcome = ActionOutcome::from_response(response(StatusCode::NO_CONTENT, &[], ""));
        assert!(outcome.task_monitor().is_none());
        assert!(matches!(outcome, ActionOutcome::Completed(_)));
    }

    #[test]
    fn test_created_captures_location() {
        let outcome = ActionOutcome::from_response(response(
            StatusCode::CREATED,
            &[("location", "/redfish/v1/EventService/Subscriptions/7")],
            "",
        ));
        match outcome {
            ActionOutcome::Created { location, .. } => {
                assert_eq!(location, "/redfish/v1/EventService/Subscriptions/7");
            }
            other => panic!("expected Created, got {other:?}"),
        }
    }

    #[test]
    fn test_accepted_with_delay_and_task_body() {
        let outcome = ActionOutcome::from_response(response(
            StatusCode::ACCEPTED,
            &[
                ("location", "/redfish/v1/TaskService/Tasks/545"),
                ("retry-after", "20"),
            ],
            r#"{"@odata.id": "/redfish/v1/TaskService/Tasks/545", "Id": "545", "TaskState": "Running"}"#,
        ));
        let monitor = outcome.task_monitor().unwrap();
        assert_eq!(monitor.uri, "/redfish/v1/TaskService/Tasks/545");
        assert_eq!(monitor.retry_after, Some(RetryAfter::Delay(Duration::from_secs(20))));
        let task = monitor.task.as_ref().unwrap();
        assert_eq!(task.base.id, "545");
    }

    #[test]
    fn test_accepted_http_date_retry_after() {
        let outcome = ActionOutcome::from_response(response(
            StatusCode::ACCEPTED,
            &[("retry-after", "Fri, 15 May 2026 15:00:00 GMT")],
            "",
        ));
        let monitor = outcome.task_monitor().unwrap();
        assert!(monitor.uri.is_empty());
        assert!(matches!(monitor.retry_after, Some(RetryAfter::At(_))));
        assert!(monitor.task.is_none());
    }

    #[test]
    fn test_accepted_ignores_undecodable_body() {
        let outcome = ActionOutcome::from_response(response(
            StatusCode::ACCEPTED,
            &[("location", "/redfish/v1/TaskService/Tasks/1")],
            "pending",
        ));
        assert!(outcome.task_monitor().unwrap().task.is_none());
    }
}
