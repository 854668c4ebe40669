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

//! The shipped [`HttpClient`]: reqwest with the knobs BMCs need, mainly
//! self-signed certificate acceptance.

use std::time::Duration;

use crate::bmc_http::{HttpBody, HttpClient, HttpRequest};
use crate::core::bmc::Response;

#[derive(Clone, Debug, Default)]
pub struct ClientParams {
    accept_invalid_certs: bool,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ClientParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trust any server certificate. BMCs almost universally present
    /// self-signed certificates.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BmcError {
    #[error("http client error: {0}")]
    ReqwestError(#[from] ::reqwest::Error),
}

/// reqwest-backed [`HttpClient`]. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    inner: ::reqwest::Client,
}

impl Client {
    pub fn new() -> Result<Self, ::reqwest::Error> {
        Self::with_params(ClientParams::new())
    }

    pub fn with_params(params: ClientParams) -> Result<Self, ::reqwest::Error> {
        let mut builder = ::reqwest::Client::builder()
            .danger_accept_invalid_certs(params.accept_invalid_certs);
        if let Some(timeout) = params.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = params.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        Ok(Self {
            inner: builder.build()?,
        })
    }
}

impl HttpClient for Client {
    type Error = BmcError;

    async fn execute(&self, request: HttpRequest) -> Result<Response, BmcError> {
        let mut builder = self
            .inner
            .request(request.method, &request.url)
            .headers(request.headers);
        builder = match request.body {
            HttpBody::Empty => builder,
            HttpBody::Json(bytes) => builder.body(bytes),
            HttpBody::Multipart(parts) => {
                let mut form = ::reqwest::multipart::Form::new();
                for part in parts {
                    let mut piece = ::reqwest::multipart::Part::bytes(part.data.to_vec())
                        .mime_str(&part.content_type)?;
                    if let Some(filename) = part.filename {
                        piece = piece.file_name(filename);
                    }
                    form = form.part(part.name, piece);
                }
                builder.multipart(form)
            }
        };
        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
