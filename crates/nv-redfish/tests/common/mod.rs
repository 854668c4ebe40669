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

// tests/common/mod.rs
// Shared canned-response transport for object model tests. Fixtures are
// keyed by method and URI; every request is journaled for assertions.

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Mutex;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use nv_redfish::core::{Bmc, MultipartPart, Response};
use serde_json::{Value, json};

#[derive(Clone, Debug)]
pub struct RecordedPart {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: String,
    pub body: Bytes,
}

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub uri: String,
    pub body: Option<Value>,
    pub headers: HeaderMap,
    pub parts: Vec<RecordedPart>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

/// In-memory [`Bmc`] with per-(method, URI) fixtures. Unregistered URIs
/// answer 404 with a standard error envelope.
#[derive(Default)]
pub struct MockBmc {
    fixtures: HashMap<(&'static str, String), Canned>,
    journal: Mutex<Vec<RecordedRequest>>,
}

impl MockBmc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canned(
        mut self,
        method: &'static str,
        uri: &str,
        status: u16,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                name.parse::<HeaderName>().unwrap(),
                value.parse::<HeaderValue>().unwrap(),
            );
        }
        self.fixtures.insert(
            (method, uri.to_owned()),
            Canned {
                status: StatusCode::from_u16(status).unwrap(),
                headers: map,
                body: body.map(|value| Bytes::from(value.to_string())).unwrap_or_default(),
            },
        );
        self
    }

    /// Serve `body` for GETs of `uri`.
    pub fn with_body(self, uri: &str, body: Value) -> Self {
        self.with_canned("GET", uri, 200, &[], Some(body))
    }

    /// Serve `body` for GETs of `uri` with an `ETag` response header.
    pub fn with_etag(self, uri: &str, etag: &str, body: Value) -> Self {
        self.with_canned("GET", uri, 200, &[("etag", etag)], Some(body))
    }

    /// Serve an empty-bodied response with the given status.
    pub fn with_status(self, method: &'static str, uri: &str, status: u16) -> Self {
        self.with_canned(method, uri, status, &[], None)
    }

    pub fn with_response(
        self,
        method: &'static str,
        uri: &str,
        status: u16,
        body: Value,
    ) -> Self {
        self.with_canned(method, uri, status, &[], Some(body))
    }

    /// Serve a response carrying a `Location` header, as actions and
    /// subscription creation do.
    pub fn with_location(
        self,
        method: &'static str,
        uri: &str,
        status: u16,
        location: &str,
    ) -> Self {
        self.with_canned(method, uri, status, &[("location", location)], None)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.journal.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, uri: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.uri == uri)
            .collect()
    }

    fn record(
        &self,
        method: &'static str,
        uri: &str,
        body: Option<&Bytes>,
        headers: &HeaderMap,
        parts: Vec<RecordedPart>,
    ) {
        self.journal.lock().unwrap().push(RecordedRequest {
            method,
            uri: uri.to_owned(),
            body: body.and_then(|bytes| serde_json::from_slice(bytes).ok()),
            headers: headers.clone(),
            parts,
        });
    }

    fn respond(&self, method: &'static str, uri: &str) -> Response {
        match self.fixtures.get(&(method, uri.to_owned())) {
            Some(canned) => Response {
                status: canned.status,
                headers: canned.headers.clone(),
                body: canned.body.clone(),
            },
            None => Response {
                status: StatusCode::NOT_FOUND,
                headers: HeaderMap::new(),
                body: Bytes::from(
                    json!({
                        "error": {
                            "code": "Base.1.19.ResourceMissingAtURI",
                            "message": format!("no fixture registered for {method} {uri}")
                        }
                    })
                    .to_string(),
                ),
            },
        }
    }
}

impl Bmc for MockBmc {
    type Error = Infallible;

    async fn get_with_headers(
        &self,
        uri: &str,
        headers: HeaderMap,
    ) -> Result<Response, Infallible> {
        self.record("GET", uri, None, &headers, Vec::new());
        Ok(self.respond("GET", uri))
    }

    async fn post_with_headers(
        &self,
        uri: &str,
        body: Bytes,
        headers: HeaderMap,
    ) -> Result<Response, Infallible> {
        self.record("POST", uri, Some(&body), &headers, Vec::new());
        Ok(self.respond("POST", uri))
    }

    async fn patch_with_headers(
        &self,
        uri: &str,
        body: Bytes,
        headers: HeaderMap,
    ) -> Result<Response, Infallible> {
        self.record("PATCH", uri, Some(&body), &headers, Vec::new());
        Ok(self.respond("PATCH", uri))
    }

    async fn put_with_headers(
        &self,
        uri: &str,
        body: Bytes,
        headers: HeaderMap,
    ) -> Result<Response, Infallible> {
        self.record("PUT", uri, Some(&body), &headers, Vec::new());
        Ok(self.respond("PUT", uri))
    }

    async fn delete_with_headers(
        &self,
        uri: &str,
        headers: HeaderMap,
    ) -> Result<Response, Infallible> {
        self.record("DELETE", uri, None, &headers, Vec::new());
        Ok(self.respond("DELETE", uri))
    }

    async fn post_multipart(
        &self,
        uri: &str,
        parts: Vec<MultipartPart>,
        headers: HeaderMap,
    ) -> Result<Response, Infallible> {
        let recorded = parts
            .iter()
            .map(|part| RecordedPart {
                name: part.name.clone(),
                filename: part.filename.clone(),
                content_type: part.content_type.clone(),
                body: part.data.clone(),
            })
            .collect();
        self.record("POST", uri, None, &headers, recorded);
        Ok(self.respond("POST", uri))
    }
}
