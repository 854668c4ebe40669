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
use std::marker::PhantomData;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::action::ActionOutcome;
use crate::core::bmc::{Bmc, Query, Response};
use crate::core::collection::Collection;
use crate::core::error::{Error, ServiceError};
use crate::core::json::writable_diff;
use crate::core::odata::{ActionTarget, Link, LinkList, ODataId, Resource};

/// A schema record: the typed form of one resource body. Implementors
/// are plain data structs with a flattened [`Resource`] base.
pub trait SchemaObject: DeserializeOwned + Serialize + Send + Sync + 'static {
    fn resource(&self) -> &Resource;

    fn id(&self) -> &str {
        &self.resource().id
    }

    fn name(&self) -> &str {
        &self.resource().name
    }

    fn odata_id(&self) -> &ODataId {
        &self.resource().odata_id
    }

    /// Hook for repairing known service-side spelling bugs right after
    /// decode, before the record is visible to callers.
    fn normalize(&mut self) {}
}

/// Schema records with a PATCHable subset. `WRITABLE` lists the JSON
/// property names, which may differ from the Rust field names.
pub trait ReadWrite: SchemaObject {
    const WRITABLE: &'static [&'static str];
}

/// A bound resource: a decoded record plus everything needed to keep
/// talking to the service about it. Binding captures the exact response
/// bytes; [`Entity::update`] later diffs against them.
pub struct Entity<B: Bmc, T> {
    bmc: Arc<B>,
    uri: ODataId,
    data: T,
    headers: HeaderMap,
    etag: Option<String>,
    image: Bytes,
    strip_etag_quotes: bool,
    disable_etag_match: bool,
}

impl<B: Bmc, T: SchemaObject> Entity<B, T> {
    /// GET `uri` and bind the body. Entry point for resources addressed
    /// directly by URI rather than reached through traversal.
    pub async fn get(bmc: Arc<B>, uri: &str) -> Result<Self, Error<B>> {
        if uri.trim().is_empty() {
            return Err(Error::InvalidArgument("resource URI is empty".to_owned()));
        }
        Self::fetch(bmc, uri).await
    }

    pub(crate) async fn fetch(bmc: Arc<B>, uri: &str) -> Result<Self, Error<B>> {
        let response = bmc.get(uri).await.map_err(Error::Transport)?;
        if !response.status.is_success() {
            return Err(ServiceError::from_response(&response).into());
        }
        Self::bind(bmc, uri, response)
    }

    /// Bind a response body fetched from `uri`. The canonical URI is the
    /// body's `@odata.id` when present, else `uri`; the ETag is the
    /// body's `@odata.etag` when present, else the response header.
    pub(crate) fn bind(bmc: Arc<B>, uri: &str, response: Response) -> Result<Self, Error<B>> {
        let header_etag = response.etag();
        let mut data: T = response.json().map_err(|source| Error::decode(uri, source))?;
        data.normalize();
        let resource = data.resource();
        let canonical = if resource.odata_id.is_empty() {
            ODataId::new(uri)
        } else {
            resource.odata_id.clone()
        };
        let etag = resource.odata_etag.clone().or(header_etag);
        let Response { headers, body, .. } = response;
        Ok(Self {
            bmc,
            uri: canonical,
            data,
            headers,
            etag,
            image: body,
            strip_etag_quotes: false,
            disable_etag_match: false,
        })
    }

    /// The canonical URI this entity answers to.
    pub fn uri(&self) -> &ODataId {
        &self.uri
    }

    pub fn raw(&self) -> &T {
        &self.data
    }

    /// Mutable access to the record, for staging writable-property edits
    /// ahead of [`Entity::update`].
    pub fn raw_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn into_raw(self) -> T {
        self.data
    }

    /// Response headers from the GET this entity was bound from.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// The exact bytes of the most recent successful GET. Replaced only
    /// by [`Entity::refresh`], never by local mutation.
    pub fn as_received(&self) -> &Bytes {
        &self.image
    }

    pub fn bmc(&self) -> &Arc<B> {
        &self.bmc
    }

    /// Send the ETag without its surrounding quotes. Some services hand
    /// out quoted ETags they then refuse to match.
    pub fn set_strip_etag_quotes(&mut self, strip: bool) {
        self.strip_etag_quotes = strip;
    }

    /// Stop sending `If-Match` entirely, for services whose ETags churn
    /// on every GET.
    pub fn set_disable_etag_match(&mut self, disable: bool) {
        self.disable_etag_match = disable;
    }

    /// Re-GET this resource and rebind, replacing the record and the
    /// as-received image. ETag handling switches survive the rebind.
    pub async fn refresh(&mut self) -> Result<(), Error<B>> {
        let fresh = Self::fetch(Arc::clone(&self.bmc), self.uri.as_str()).await?;
        *self = Self {
            strip_etag_quotes: self.strip_etag_quotes,
            disable_etag_match: self.disable_etag_match,
            ..fresh
        };
        Ok(())
    }

    /// PATCH an arbitrary payload to this resource, with the usual
    /// `If-Match` handling. Escape hatch for vendor properties outside
    /// the declared writable set.
    pub async fn patch(&self, payload: &Value) -> Result<Response, Error<B>> {
        let body = Bytes::from(payload.to_string());
        let response = self
            .bmc
            .patch_with_headers(self.uri.as_str(), body, self.condition_headers())
            .await
            .map_err(Error::Transport)?;
        if !response.status.is_success() {
            return Err(ServiceError::from_response(&response).into());
        }
        Ok(response)
    }

    /// DELETE this resource.
    pub async fn delete(&self) -> Result<Response, Error<B>> {
        let response = self
            .bmc
            .delete(self.uri.as_str())
            .await
            .map_err(Error::Transport)?;
        if !response.status.is_success() {
            return Err(ServiceError::from_response(&response).into());
        }
        Ok(response)
    }

    fn condition_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if self.disable_etag_match {
            return headers;
        }
        if let Some(etag) = self.etag.as_deref() {
            let value = if self.strip_etag_quotes {
                etag.trim_matches('"')
            } else {
                etag
            };
            match HeaderValue::from_str(value) {
                Ok(value) => {
                    headers.insert(http::header::IF_MATCH, value);
                }
                Err(_) => {
                    tracing::debug!(
                        uri = %self.uri,
                        "etag is not a valid header value, sending unconditionally"
                    );
                }
            }
        }
        headers
    }

    /// Follow a single link; an empty link is `Ok(None)` and no request.
    pub(crate) async fn follow<U: SchemaObject>(
        &self,
        link: &Link,
    ) -> Result<Option<Entity<B, U>>, Error<B>> {
        self.fetch_optional(link.uri()).await
    }

    pub(crate) async fn fetch_optional<U: SchemaObject>(
        &self,
        uri: Option<&ODataId>,
    ) -> Result<Option<Entity<B, U>>, Error<B>> {
        match uri {
            None => Ok(None),
            Some(uri) => Entity::fetch(Arc::clone(&self.bmc), uri.as_str())
                .await
                .map(Some),
        }
    }

    /// Follow every link in the list, in order, one GET at a time.
    pub(crate) async fn follow_many<U: SchemaObject>(
        &self,
        links: &LinkList,
    ) -> Result<Vec<Entity<B, U>>, Error<B>> {
        let mut entities = Vec::with_capacity(links.len());
        for uri in links.iter() {
            entities.push(Entity::fetch(Arc::clone(&self.bmc), uri.as_str()).await?);
        }
        Ok(entities)
    }

    /// Fetch the collection a link points to; an empty link yields the
    /// empty collection.
    pub(crate) async fn collection<U: SchemaObject>(
        &self,
        link: &Link,
    ) -> Result<Collection<B, U>, Error<B>> {
        self.collection_with(link, None).await
    }

    pub(crate) async fn collection_with<U: SchemaObject>(
        &self,
        link: &Link,
        query: Option<&Query>,
    ) -> Result<Collection<B, U>, Error<B>> {
        match link.uri() {
            None => Ok(Collection::empty(Arc::clone(&self.bmc))),
            Some(uri) => Collection::fetch(Arc::clone(&self.bmc), uri.as_str(), query).await,
        }
    }

    pub(crate) fn entity_ref<U: SchemaObject>(&self, uri: &ODataId) -> EntityTypeRef<B, U> {
        EntityTypeRef::new(Arc::clone(&self.bmc), uri.clone())
    }

    /// POST `payload` to an action target. When the target is absent the
    /// action is unsupported and no request is issued.
    pub(crate) async fn invoke(
        &self,
        name: &str,
        target: Option<&ActionTarget>,
        payload: &Value,
    ) -> Result<ActionOutcome, Error<B>> {
        let uri = target
            .and_then(ActionTarget::target)
            .ok_or_else(|| Error::NotSupported(format!("action {name}")))?;
        let body = Bytes::from(payload.to_string());
        let response = self
            .bmc
            .post(uri.as_str(), body)
            .await
            .map_err(Error::Transport)?;
        if !response.status.is_success() {
            return Err(ServiceError::from_response(&response).into());
        }
        Ok(ActionOutcome::from_response(response))
    }

    pub(crate) async fn post_json(&self, uri: &str, payload: &Value) -> Result<Response, Error<B>> {
        let body = Bytes::from(payload.to_string());
        let response = self
            .bmc
            .post(uri, body)
            .await
            .map_err(Error::Transport)?;
        if !response.status.is_success() {
            return Err(ServiceError::from_response(&response).into());
        }
        Ok(response)
    }
}

impl<B: Bmc, T: ReadWrite> Entity<B, T> {
    /// The PATCH body [`Entity::update`] would send right now: writable
    /// properties whose current value differs from the as-received
    /// image, under their JSON names. A property edited to null that was
    /// present in the image is an explicit clear and appears as null.
    pub fn pending_changes(&self) -> Result<serde_json::Map<String, Value>, Error<B>> {
        let current = serde_json::to_value(&self.data)
            .map_err(|source| Error::decode(self.uri.as_str(), source))?;
        let image: Value = serde_json::from_slice(&self.image)
            .map_err(|source| Error::decode(self.uri.as_str(), source))?;
        Ok(writable_diff(&image, &current, T::WRITABLE))
    }

    /// PATCH the writable properties changed since the last GET. Issues
    /// nothing when no property changed. The as-received image is not
    /// replaced on success; call [`Entity::refresh`] to observe the
    /// service's view afterwards.
    pub async fn update(&mut self) -> Result<(), Error<B>> {
        let changes = self.pending_changes()?;
        if changes.is_empty() {
            tracing::debug!(uri = %self.uri, "update: no writable changes");
            return Ok(());
        }
        tracing::debug!(uri = %self.uri, properties = changes.len(), "patching resource");
        self.patch(&Value::Object(changes)).await?;
        Ok(())
    }
}

impl<B: Bmc, T: Clone> Clone for Entity<B, T> {
    fn clone(&self) -> Self {
        Self {
            bmc: Arc::clone(&self.bmc),
            uri: self.uri.clone(),
            data: self.data.clone(),
            headers: self.headers.clone(),
            etag: self.etag.clone(),
            image: self.image.clone(),
            strip_etag_quotes: self.strip_etag_quotes,
            disable_etag_match: self.disable_etag_match,
        }
    }
}

impl<B: Bmc, T: fmt::Debug> fmt::Debug for Entity<B, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("uri", &self.uri)
            .field("etag", &self.etag)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

/// A typed reference to a resource that has not been fetched. Holds the
/// URI and the transport; fetching is on demand, so a caller can hold a
/// large set of references and poll only the ones it cares about.
pub struct EntityTypeRef<B: Bmc, T> {
    bmc: Arc<B>,
    uri: ODataId,
    _marker: PhantomData<fn() -> T>,
}

impl<B: Bmc, T: SchemaObject> EntityTypeRef<B, T> {
    pub(crate) fn new(bmc: Arc<B>, uri: ODataId) -> Self {
        Self {
            bmc,
            uri,
            _marker: PhantomData,
        }
    }

    pub fn odata_id(&self) -> &ODataId {
        &self.uri
    }

    /// GET the resource and return just the record.
    pub async fn fetch(&self) -> Result<T, Error<B>> {
        self.resolve().await.map(Entity::into_raw)
    }

    /// GET the resource and return the bound entity.
    pub async fn resolve(&self) -> Result<Entity<B, T>, Error<B>> {
        Entity::fetch(Arc::clone(&self.bmc), self.uri.as_str()).await
    }
}

impl<B: Bmc, T> Clone for EntityTypeRef<B, T> {
    fn clone(&self) -> Self {
        Self {
            bmc: Arc::clone(&self.bmc),
            uri: self.uri.clone(),
            _marker: PhantomData,
        }
    }
}

impl<B: Bmc, T> fmt::Debug for EntityTypeRef<B, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityTypeRef")
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}
