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

//! The update service: firmware inventory, pull updates via
//! `SimpleUpdate`, and multipart push updates.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::action_info::ActionInfo;
use crate::core::action::ActionOutcome;
use crate::core::bmc::{Bmc, MultipartPart};
use crate::core::entity::{Entity, ReadWrite, SchemaObject};
use crate::core::error::{Error, ServiceError};
use crate::core::json::double_option;
use crate::core::odata::{ActionTarget, Link, ODataId, Resource};
use crate::core::types::{Status, redfish_enum};

redfish_enum! {
    pub enum TransferProtocol {
        Cifs => "CIFS",
        Ftp => "FTP",
        Sftp => "SFTP",
        Http => "HTTP",
        Https => "HTTPS",
        Nfs => "NFS",
        Scp => "SCP",
        Tftp => "TFTP",
        Oem => "OEM",
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
struct UpdateServiceActions {
    #[serde(rename = "#UpdateService.SimpleUpdate", default)]
    simple_update: Option<ActionTarget>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpdateServiceData {
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
        rename = "MaxImageSizeBytes",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_image_size_bytes: Option<Option<i64>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "FirmwareInventory", default)]
    firmware_inventory: Link,
    #[serde(rename = "SoftwareInventory", default)]
    software_inventory: Link,
    #[serde(rename = "HttpPushUri", default, skip_serializing_if = "Option::is_none")]
    http_push_uri: Option<ODataId>,
    #[serde(
        rename = "MultipartHttpPushUri",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    multipart_http_push_uri: Option<ODataId>,
    #[serde(rename = "Actions", default)]
    actions: UpdateServiceActions,
}

impl UpdateServiceData {
    /// Where raw images are POSTed, when the service supports simple
    /// HTTP push.
    pub fn http_push_uri(&self) -> Option<&ODataId> {
        self.http_push_uri.as_ref().filter(|uri| !uri.is_empty())
    }

    /// Where multipart update requests are POSTed, when supported.
    pub fn multipart_push_uri(&self) -> Option<&ODataId> {
        self.multipart_http_push_uri
            .as_ref()
            .filter(|uri| !uri.is_empty())
    }
}

impl SchemaObject for UpdateServiceData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

impl ReadWrite for UpdateServiceData {
    const WRITABLE: &'static [&'static str] = &["ServiceEnabled"];
}

pub type UpdateService<B> = Entity<B, UpdateServiceData>;

impl<B: Bmc> UpdateService<B> {
    pub async fn firmware_inventories(&self) -> Result<Vec<SoftwareInventory<B>>, Error<B>> {
        self.collection(&self.raw().firmware_inventory)
            .await?
            .members()
            .await
    }

    pub async fn software_inventories(&self) -> Result<Vec<SoftwareInventory<B>>, Error<B>> {
        self.collection(&self.raw().software_inventory)
            .await?
            .members()
            .await
    }

    /// Invoke `UpdateService.SimpleUpdate`, telling the service to pull
    /// an image from `image_uri`.
    pub async fn simple_update(
        &self,
        image_uri: &str,
        transfer_protocol: Option<TransferProtocol>,
    ) -> Result<ActionOutcome, Error<B>> {
        let mut payload = json!({"ImageURI": image_uri});
        if let Some(protocol) = transfer_protocol {
            payload["TransferProtocol"] = json!(protocol);
        }
        self.invoke(
            "UpdateService.SimpleUpdate",
            self.raw().actions.simple_update.as_ref(),
            &payload,
        )
        .await
    }

    pub async fn simple_update_action_info(&self) -> Result<Option<ActionInfo<B>>, Error<B>> {
        self.fetch_optional(
            self.raw()
                .actions
                .simple_update
                .as_ref()
                .and_then(ActionTarget::action_info),
        )
        .await
    }

    /// Push an image to the service as a multipart POST: one
    /// `UpdateParameters` JSON part, one `UpdateFile` binary part.
    /// Unsupported when the service advertises no multipart push URI.
    pub async fn push_update(
        &self,
        image: Bytes,
        filename: &str,
        parameters: &UpdateParameters,
    ) -> Result<ActionOutcome, Error<B>> {
        let Some(uri) = self.raw().multipart_push_uri() else {
            return Err(Error::NotSupported("multipart HTTP push".to_owned()));
        };
        let encoded = serde_json::to_vec(parameters)
            .map_err(|err| Error::InvalidArgument(format!("update parameters: {err}")))?;
        let parts = vec![
            MultipartPart::json("UpdateParameters", encoded),
            MultipartPart::file("UpdateFile", filename, "application/octet-stream", image),
        ];
        let response = self
            .bmc()
            .post_multipart(uri.as_str(), parts, HeaderMap::new())
            .await
            .map_err(Error::Transport)?;
        if !response.status.is_success() {
            return Err(ServiceError::from_response(&response).into());
        }
        Ok(ActionOutcome::from_response(response))
    }
}

/// The JSON part of a multipart push: which components the image
/// applies to, plus vendor extensions.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UpdateParameters {
    #[serde(rename = "Targets", skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,
    #[serde(rename = "Oem", skip_serializing_if = "Option::is_none")]
    pub oem: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SoftwareInventoryData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "Version",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<Option<String>>,
    #[serde(
        rename = "Manufacturer",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub manufacturer: Option<Option<String>>,
    #[serde(
        rename = "SoftwareId",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub software_id: Option<Option<String>>,
    #[serde(
        rename = "Updateable",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updateable: Option<Option<bool>>,
    #[serde(
        rename = "ReleaseDate",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date: Option<Option<DateTime<Utc>>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl SchemaObject for SoftwareInventoryData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type SoftwareInventory<B> = Entity<B, SoftwareInventoryData>;
