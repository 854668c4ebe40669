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

use serde::Deserialize;

use crate::core::bmc::{Bmc, Query};
use crate::core::entity::{Entity, EntityTypeRef, SchemaObject};
use crate::core::error::{Error, ServiceError};
use crate::core::odata::{LinkList, ODataId, Resource};

#[derive(Debug, Default, Deserialize)]
struct CollectionBody {
    #[serde(flatten)]
    base: Resource,
    #[serde(rename = "Members", default)]
    members: LinkList,
    #[serde(rename = "Members@odata.count", default)]
    count: Option<u64>,
    #[serde(rename = "Members@odata.nextLink", default)]
    next_link: Option<ODataId>,
}

/// A fetched resource collection, holding the first page of member URIs.
/// Members are bound on demand: [`Collection::members`] walks any
/// remaining pages and GETs every member in declared order, while
/// [`Collection::member_refs`] stops at the URIs so callers can fetch
/// selectively.
pub struct Collection<B: Bmc, T> {
    bmc: Arc<B>,
    uri: ODataId,
    ids: Vec<ODataId>,
    count: Option<u64>,
    next: Option<ODataId>,
    _marker: PhantomData<fn() -> T>,
}

impl<B: Bmc, T: SchemaObject> Collection<B, T> {
    pub(crate) async fn fetch(
        bmc: Arc<B>,
        uri: &str,
        query: Option<&Query>,
    ) -> Result<Self, Error<B>> {
        let target = match query {
            Some(query) => query.apply(uri),
            None => uri.to_owned(),
        };
        let page = Self::fetch_page(&bmc, &target).await?;
        Ok(Self {
            bmc,
            uri: if page.base.odata_id.is_empty() {
                ODataId::new(uri)
            } else {
                page.base.odata_id
            },
            ids: page.members.into_uris(),
            count: page.count,
            next: page.next_link.filter(|uri| !uri.is_empty()),
            _marker: PhantomData,
        })
    }

    /// The collection a link that was absent resolves to.
    pub(crate) fn empty(bmc: Arc<B>) -> Self {
        Self {
            bmc,
            uri: ODataId::default(),
            ids: Vec::new(),
            count: Some(0),
            next: None,
            _marker: PhantomData,
        }
    }

    async fn fetch_page(bmc: &B, uri: &str) -> Result<CollectionBody, Error<B>> {
        let response = bmc.get(uri).await.map_err(Error::Transport)?;
        if !response.status.is_success() {
            return Err(ServiceError::from_response(&response).into());
        }
        response.json().map_err(|source| Error::decode(uri, source))
    }

    pub fn uri(&self) -> &ODataId {
        &self.uri
    }

    /// The service-declared `Members@odata.count`, which may exceed the
    /// first page when the collection is paged.
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    /// Member URIs of the page already fetched, in declared order.
    pub fn page_ids(&self) -> &[ODataId] {
        &self.ids
    }

    pub fn next_link(&self) -> Option<&ODataId> {
        self.next.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.next.is_none()
    }

    /// All member URIs, following `Members@odata.nextLink` until the
    /// last page. Order across pages is the service's declared order.
    pub async fn member_ids(&self) -> Result<Vec<ODataId>, Error<B>> {
        let mut ids = self.ids.clone();
        let mut next = self.next.clone();
        while let Some(uri) = next {
            let page = Self::fetch_page(&self.bmc, uri.as_str()).await?;
            ids.extend(page.members.into_uris());
            next = page.next_link.filter(|uri| !uri.is_empty());
        }
        Ok(ids)
    }

    /// Unfetched references to every member.
    pub async fn member_refs(&self) -> Result<Vec<EntityTypeRef<B, T>>, Error<B>> {
        let ids = self.member_ids().await?;
        Ok(ids
            .into_iter()
            .map(|uri| EntityTypeRef::new(Arc::clone(&self.bmc), uri))
            .collect())
    }

    /// Fetch and bind every member, one GET at a time, in declared
    /// order.
    pub async fn members(&self) -> Result<Vec<Entity<B, T>>, Error<B>> {
        let ids = self.member_ids().await?;
        let mut members = Vec::with_capacity(ids.len());
        for uri in &ids {
            members.push(Entity::fetch(Arc::clone(&self.bmc), uri.as_str()).await?);
        }
        Ok(members)
    }
}

impl<B: Bmc, T> Clone for Collection<B, T> {
    fn clone(&self) -> Self {
        Self {
            bmc: Arc::clone(&self.bmc),
            uri: self.uri.clone(),
            ids: self.ids.clone(),
            count: self.count,
            next: self.next.clone(),
            _marker: PhantomData,
        }
    }
}

impl<B: Bmc, T> fmt::Debug for Collection<B, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("uri", &self.uri)
            .field("count", &self.count)
            .field("page_ids", &self.ids)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_collection_body_decode() {
        let body: CollectionBody = serde_json::from_value(json!({
            "@odata.id": "/redfish/v1/Systems",
            "Name": "Computer System Collection",
            "Members": [
                {"@odata.id": "/redfish/v1/Systems/1"},
                {"@odata.id": "/redfish/v1/Systems/2"}
            ],
            "Members@odata.count": 3,
            "Members@odata.nextLink": "/redfish/v1/Systems?$skip=2"
        }))
        .unwrap();
        assert_eq!(body.base.odata_id, "/redfish/v1/Systems");
        assert_eq!(body.members.len(), 2);
        assert_eq!(body.count, Some(3));
        assert_eq!(body.next_link.as_ref().unwrap(), "/redfish/v1/Systems?$skip=2");
    }

    #[test]
    fn test_collection_body_defaults() {
        let body: CollectionBody = serde_json::from_value(json!({
            "@odata.id": "/redfish/v1/Chassis"
        }))
        .unwrap();
        assert!(body.members.is_empty());
        assert_eq!(body.count, None);
        assert!(body.next_link.is_none());
    }
}
