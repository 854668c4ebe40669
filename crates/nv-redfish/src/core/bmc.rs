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

use std::future::Future;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use crate::core::odata::ODataId;

/// Everything the object model needs back from a transport call. The
/// body is kept as raw bytes so callers can decode it more than once.
#[derive(Clone, Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Response {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The `Location` header, if present and valid UTF-8.
    pub fn location(&self) -> Option<ODataId> {
        self.headers
            .get(http::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(ODataId::new)
            .filter(|uri| !uri.is_empty())
    }

    /// The `ETag` header, if present and valid UTF-8.
    pub fn etag(&self) -> Option<String> {
        self.headers
            .get(http::header::ETAG)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }
}

/// One part of a multipart/form-data upload.
#[derive(Clone, Debug)]
pub struct MultipartPart {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: String,
    pub data: Bytes,
}

impl MultipartPart {
    /// An application/json form field.
    pub fn json(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: "application/json".to_owned(),
            data: data.into(),
        }
    }

    /// A binary file field.
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: Some(filename.into()),
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

/// Transport abstraction the whole object model is generic over. The
/// only shipped implementation is [`crate::bmc_http::HttpBmc`]; tests
/// substitute canned-response fakes.
///
/// Implementations resolve relative URIs against their configured
/// endpoint, attach authentication, and return [`Response`] for every
/// HTTP status. `Err` is reserved for transport-level failures where no
/// response was received at all.
pub trait Bmc: Send + Sync + Sized + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get_with_headers(
        &self,
        uri: &str,
        headers: HeaderMap,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    fn post_with_headers(
        &self,
        uri: &str,
        body: Bytes,
        headers: HeaderMap,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    fn patch_with_headers(
        &self,
        uri: &str,
        body: Bytes,
        headers: HeaderMap,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    fn put_with_headers(
        &self,
        uri: &str,
        body: Bytes,
        headers: HeaderMap,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    fn delete_with_headers(
        &self,
        uri: &str,
        headers: HeaderMap,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    fn post_multipart(
        &self,
        uri: &str,
        parts: Vec<MultipartPart>,
        headers: HeaderMap,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;

    fn get(&self, uri: &str) -> impl Future<Output = Result<Response, Self::Error>> + Send {
        self.get_with_headers(uri, HeaderMap::new())
    }

    fn post(
        &self,
        uri: &str,
        body: Bytes,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send {
        self.post_with_headers(uri, body, HeaderMap::new())
    }

    fn patch(
        &self,
        uri: &str,
        body: Bytes,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send {
        self.patch_with_headers(uri, body, HeaderMap::new())
    }

    fn put(
        &self,
        uri: &str,
        body: Bytes,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send {
        self.put_with_headers(uri, body, HeaderMap::new())
    }

    fn delete(&self, uri: &str) -> impl Future<Output = Result<Response, Self::Error>> + Send {
        self.delete_with_headers(uri, HeaderMap::new())
    }
}

/// OData query options for a single GET, mainly used for collection
/// paging. Keys are written literally; several BMC implementations
/// reject a percent-encoded `$` in query keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    top: Option<u64>,
    skip: Option<u64>,
    filter: Option<String>,
    select: Option<String>,
    expand: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(mut self, top: u64) -> Self {
        self.top = Some(top);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
            && self.skip.is_none()
            && self.filter.is_none()
            && self.select.is_none()
            && self.expand.is_none()
    }

    /// Append the options to `uri`, honoring any query string already
    /// present.
    pub fn apply(&self, uri: &str) -> String {
        if self.is_empty() {
            return uri.to_owned();
        }
        let mut query = String::new();
        if let Some(top) = self.top {
            append_pair(&mut query, "$top", &top.to_string());
        }
        if let Some(skip) = self.skip {
            append_pair(&mut query, "$skip", &skip.to_string());
        }
        if let Some(filter) = &self.filter {
            append_pair(&mut query, "$filter", filter);
        }
        if let Some(select) = &self.select {
            append_pair(&mut query, "$select", select);
        }
        if let Some(expand) = &self.expand {
            append_pair(&mut query, "$expand", expand);
        }
        let separator = if uri.contains('?') { '&' } else { '?' };
        format!("{uri}{separator}{query}")
    }
}

pub(crate) fn append_pair(query: &mut String, key: &str, value: &str) {
    if !query.is_empty() {
        query.push('&');
    }
    query.push_str(key);
    query.push('=');
    query.extend(url::form_urlencoded::byte_serialize(value.as_bytes()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_empty_leaves_uri_alone() {
        assert_eq!(Query::new().apply("/redfish/v1/Systems"), "/redfish/v1/Systems");
    }

    #[test]
    fn test_query_paging() {
        let query = Query::new().top(5).skip(10);
        assert_eq!(
            query.apply("/redfish/v1/Systems"),
            "/redfish/v1/Systems?$top=5&$skip=10"
        );
    }

    #[test]
    fn test_query_appends_to_existing_query_string() {
        let query = Query::new().top(5);
        assert_eq!(
            query.apply("/redfish/v1/Systems?$skip=10"),
            "/redfish/v1/Systems?$skip=10&$top=5"
        );
    }

    #[test]
    fn test_query_encodes_values() {
        let query = Query::new().filter("Reading gt 5");
        assert_eq!(
            query.apply("/redfish/v1/Chassis/1/Sensors"),
            "/redfish/v1/Chassis/1/Sensors?$filter=Reading+gt+5"
        );
    }

    #[test]
    fn test_response_location_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::LOCATION,
            "/redfish/v1/TaskService/Tasks/42".parse().unwrap(),
        );
        let response = Response {
            status: StatusCode::ACCEPTED,
            headers,
            body: Bytes::new(),
        };
        assert_eq!(
            response.location(),
            Some(ODataId::new("/redfish/v1/TaskService/Tasks/42"))
        );
    }

    #[test]
    fn test_response_etag_header() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::ETAG, "\"W/1234\"".parse().unwrap());
        let response = Response {
            status: StatusCode::OK,
            headers,
            body: Bytes::new(),
        };
        assert_eq!(response.etag().as_deref(), Some("\"W/1234\""));
    }
}
