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

use std::fmt;

use bytes::Bytes;
use http::StatusCode;
use serde::Deserialize;

use crate::core::bmc::{Bmc, Response};
use crate::core::types::Message;

#[derive(Default, Deserialize)]
struct ErrorBody {
    #[serde(rename = "code", default)]
    code: String,
    #[serde(rename = "message", default)]
    message: String,
    #[serde(rename = "@Message.ExtendedInfo", default)]
    extended_info: Vec<Message>,
}

#[derive(Default, Deserialize)]
struct Envelope {
    #[serde(rename = "error", default)]
    error: ErrorBody,
}

/// A non-success answer from the service, with whatever could be
/// salvaged from the standard error envelope. The raw body is retained
/// for services that return vendor-shaped errors.
#[derive(Clone, Debug)]
pub struct ServiceError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub extended_info: Vec<Message>,
    pub body: Bytes,
}

impl ServiceError {
    pub fn from_response(response: &Response) -> Self {
        let envelope: Envelope = serde_json::from_slice(&response.body).unwrap_or_default();
        Self {
            status: response.status,
            code: envelope.error.code,
            message: envelope.error.message,
            extended_info: envelope.error.extended_info,
            body: response.body.clone(),
        }
    }

    /// True for 412, the status a service answers with when an
    /// `If-Match` precondition did not hold.
    pub fn is_precondition_failed(&self) -> bool {
        self.status == StatusCode::PRECONDITION_FAILED
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "service returned {}", self.status)?;
        if !self.code.is_empty() {
            write!(f, " ({})", self.code)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        } else if let Some(detail) = self.extended_info.iter().find(|m| !m.message.is_empty()) {
            write!(f, ": {}", detail.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

/// Any failure surfaced by the object model, generic over the transport
/// so transport errors keep their concrete type.
#[derive(thiserror::Error)]
pub enum Error<B: Bmc> {
    /// A caller-supplied value was rejected before any request was made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The transport failed outright; no response was received.
    #[error("transport request failed")]
    Transport(#[source] B::Error),

    /// A response arrived but its body did not decode as the expected
    /// schema.
    #[error("failed to decode response from {uri}")]
    Decode {
        uri: String,
        #[source]
        source: serde_json::Error,
    },

    /// The service answered with a non-success status.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The resource does not advertise the requested action or feature.
    #[error("{0} is not supported by this resource")]
    NotSupported(String),

    /// A named item was absent from the set that was searched.
    #[error("{0} not found")]
    NotFound(String),
}

impl<B: Bmc> Error<B> {
    pub fn service(&self) -> Option<&ServiceError> {
        match self {
            Error::Service(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_precondition_failed(&self) -> bool {
        self.service().is_some_and(ServiceError::is_precondition_failed)
    }

    pub(crate) fn decode(uri: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Decode {
            uri: uri.into(),
            source,
        }
    }
}

// Hand-written so the impl does not demand `B: Debug`; `B::Error` is
// already Debug through `std::error::Error`.
impl<B: Bmc> fmt::Debug for Error<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(message) => {
                f.debug_tuple("InvalidArgument").field(message).finish()
            }
            Error::Transport(source) => f.debug_tuple("Transport").field(source).finish(),
            Error::Decode { uri, source } => f
                .debug_struct("Decode")
                .field("uri", uri)
                .field("source", source)
                .finish(),
            Error::Service(error) => f.debug_tuple("Service").field(error).finish(),
            Error::NotSupported(what) => f.debug_tuple("NotSupported").field(what).finish(),
            Error::NotFound(what) => f.debug_tuple("NotFound").field(what).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderMap;

    use super::*;

    fn response(status: StatusCode, body: &str) -> Response {
        Response {
            status,
            headers: HeaderMap::new(),
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    #[test]
    fn test_standard_envelope() {
        let error = ServiceError::from_response(&response(
            StatusCode::BAD_REQUEST,
            r#"{"error": {
                "code": "Base.1.8.GeneralError",
                "message": "A general error has occurred.",
                "@Message.ExtendedInfo": [
                    {"MessageId": "Base.1.8.PropertyValueNotInList", "Message": "Value not in list."}
                ]
            }}"#,
        ));
        assert_eq!(error.code, "Base.1.8.GeneralError");
        assert_eq!(error.message, "A general error has occurred.");
        assert_eq!(error.extended_info.len(), 1);
        assert_eq!(
            error.extended_info[0].message_id,
            "Base.1.8.PropertyValueNotInList"
        );
    }

    #[test]
    fn test_vendor_shaped_body_keeps_raw_bytes() {
        let error =
            ServiceError::from_response(&response(StatusCode::INTERNAL_SERVER_ERROR, "not json"));
        assert!(error.code.is_empty());
        assert_eq!(&error.body[..], b"not json");
        assert_eq!(error.to_string(), "service returned 500 Internal Server Error");
    }

    #[test]
    fn test_display_prefers_message_then_extended_info() {
        let with_message = ServiceError::from_response(&response(
            StatusCode::BAD_REQUEST,
            r#"{"error": {"code": "C", "message": "top level"}}"#,
        ));
        assert!(with_message.to_string().ends_with("top level"));

        let extended_only = ServiceError::from_response(&response(
            StatusCode::BAD_REQUEST,
            r#"{"error": {"@Message.ExtendedInfo": [{"Message": "from extended info"}]}}"#,
        ));
        assert!(extended_only.to_string().ends_with("from extended info"));
    }

    #[test]
    fn test_precondition_failed() {
        let error = ServiceError::from_response(&response(StatusCode::PRECONDITION_FAILED, "{}"));
        assert!(error.is_precondition_failed());
        let error = ServiceError::from_response(&response(StatusCode::CONFLICT, "{}"));
        assert!(!error.is_precondition_failed());
    }
}
