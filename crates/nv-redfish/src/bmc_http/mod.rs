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

//! HTTP transport: [`HttpBmc`] implements [`Bmc`] on top of a pluggable
//! [`HttpClient`], adding base-URL resolution, authentication, protocol
//! headers, and configured default query options.

pub mod reqwest;

use std::collections::HashSet;
use std::fmt;
use std::future::Future;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderName, HeaderValue, Method};

use crate::core::bmc::{Bmc, MultipartPart, Response, append_pair};

const ODATA_VERSION: HeaderName = HeaderName::from_static("odata-version");
const X_AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");

/// Request body variants the transport can carry.
#[derive(Clone, Debug)]
pub enum HttpBody {
    Empty,
    Json(Bytes),
    Multipart(Vec<MultipartPart>),
}

/// A fully-resolved request, ready for an [`HttpClient`] to execute.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: HttpBody,
}

/// The actual HTTP engine underneath [`HttpBmc`]. Split out so the
/// transport can be exercised without sockets and so the reqwest
/// dependency stays confined to one module.
pub trait HttpClient: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;
}

/// Authentication material for one BMC. Session tokens take precedence
/// over basic credentials when both are present.
#[derive(Clone)]
pub struct BmcCredentials {
    username: String,
    password: String,
    session_token: Option<String>,
}

impl BmcCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn apply(&self, headers: &mut HeaderMap) {
        if let Some(token) = &self.session_token {
            if let Ok(mut value) = HeaderValue::from_str(token) {
                value.set_sensitive(true);
                headers.insert(X_AUTH_TOKEN, value);
            }
            return;
        }
        if self.username.is_empty() && self.password.is_empty() {
            return;
        }
        let encoded = BASE64.encode(format!("{}:{}", self.username, self.password));
        if let Ok(mut value) = HeaderValue::from_str(&format!("Basic {encoded}")) {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
    }
}

impl fmt::Debug for BmcCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BmcCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_deref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Per-endpoint transport settings.
#[derive(Clone, Debug, Default)]
pub struct ClientSettings {
    custom_headers: HeaderMap,
    default_query: Vec<(String, String)>,
}

impl ClientSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Headers attached to every request, e.g. `Forwarded` when the BMC
    /// sits behind a relay.
    pub fn custom_headers(mut self, headers: HeaderMap) -> Self {
        self.custom_headers = headers;
        self
    }

    /// A query option appended to every GET whose URI does not already
    /// carry the key. Needed for services that page collections unless
    /// told otherwise.
    pub fn default_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_query.push((key.into(), value.into()));
        self
    }
}

/// [`Bmc`] over HTTP. Resolves URIs against `base_url`, authenticates
/// every request, and speaks the JSON dialect the service expects. All
/// HTTP statuses pass through as responses; the transport errors only
/// when no response was received.
pub struct HttpBmc<C> {
    client: C,
    base_url: String,
    credentials: BmcCredentials,
    settings: ClientSettings,
}

impl<C: HttpClient> HttpBmc<C> {
    pub fn new(client: C, base_url: impl Into<String>, credentials: BmcCredentials) -> Self {
        Self::with_settings(client, base_url, credentials, ClientSettings::default())
    }

    pub fn with_settings(
        client: C,
        base_url: impl Into<String>,
        credentials: BmcCredentials,
        settings: ClientSettings,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials,
            settings,
        }
    }

    pub fn with_custom_headers(
        client: C,
        base_url: impl Into<String>,
        credentials: BmcCredentials,
        custom_headers: HeaderMap,
    ) -> Self {
        Self::with_settings(
            client,
            base_url,
            credentials,
            ClientSettings::new().custom_headers(custom_headers),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_url(&self, method: &Method, uri: &str) -> String {
        let separator = if uri.starts_with('/') { "" } else { "/" };
        let url = format!("{}{}{}", self.base_url, separator, uri);
        if *method == Method::GET && !self.settings.default_query.is_empty() {
            append_default_query(url, &self.settings.default_query)
        } else {
            url
        }
    }

    fn request_headers(&self, extra: HeaderMap, json_body: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ODATA_VERSION, HeaderValue::from_static("4.0"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("nv-redfish/", env!("CARGO_PKG_VERSION"))),
        );
        if json_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for (name, value) in &self.settings.custom_headers {
            headers.insert(name, value.clone());
        }
        self.credentials.apply(&mut headers);
        // Per-call headers override everything else, If-Match included.
        for (name, value) in extra {
            if let Some(name) = name {
                headers.insert(name, value);
            }
        }
        headers
    }

    async fn run(
        &self,
        method: Method,
        uri: &str,
        body: HttpBody,
        extra: HeaderMap,
    ) -> Result<Response, C::Error> {
        let url = self.request_url(&method, uri);
        let headers = self.request_headers(extra, matches!(body, HttpBody::Json(_)));
        tracing::debug!(method = %method, url = %url, "sending request");
        let response = self
            .client
            .execute(HttpRequest {
                method,
                url: url.clone(),
                headers,
                body,
            })
            .await?;
        tracing::debug!(status = %response.status, url = %url, "request completed");
        Ok(response)
    }
}

impl<C: HttpClient> Bmc for HttpBmc<C> {
    type Error = C::Error;

    async fn get_with_headers(&self, uri: &str, headers: HeaderMap) -> Result<Response, C::Error> {
        self.run(Method::GET, uri, HttpBody::Empty, headers).await
    }

    async fn post_with_headers(
        &self,
        uri: &str,
        body: Bytes,
        headers: HeaderMap,
    ) -> Result<Response, C::Error> {
        self.run(Method::POST, uri, HttpBody::Json(body), headers).await
    }

    async fn patch_with_headers(
        &self,
        uri: &str,
        body: Bytes,
        headers: HeaderMap,
    ) -> Result<Response, C::Error> {
        self.run(Method::PATCH, uri, HttpBody::Json(body), headers).await
    }

    async fn put_with_headers(
        &self,
        uri: &str,
        body: Bytes,
        headers: HeaderMap,
    ) -> Result<Response, C::Error> {
        self.run(Method::PUT, uri, HttpBody::Json(body), headers).await
    }

    async fn delete_with_headers(&self, uri: &str, headers: HeaderMap) -> Result<Response, C::Error> {
        self.run(Method::DELETE, uri, HttpBody::Empty, headers).await
    }

    async fn post_multipart(
        &self,
        uri: &str,
        parts: Vec<MultipartPart>,
        headers: HeaderMap,
    ) -> Result<Response, C::Error> {
        self.run(Method::POST, uri, HttpBody::Multipart(parts), headers)
            .await
    }
}

fn append_default_query(url: String, defaults: &[(String, String)]) -> String {
    let existing: HashSet<String> = match url.split_once('?') {
        Some((_, query)) => url::form_urlencoded::parse(query.as_bytes())
            .map(|(key, _)| key.into_owned())
            .collect(),
        None => HashSet::new(),
    };
    let mut out = url;
    for (key, value) in defaults {
        if existing.contains(key) {
            continue;
        }
        let mut pair = String::new();
        append_pair(&mut pair, key, value);
        out.push(if out.contains('?') { '&' } else { '?' });
        out.push_str(&pair);
    }
    out
}
