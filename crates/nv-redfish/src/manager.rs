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

//! `Manager` resources, the BMCs and enclosure controllers themselves.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::action_info::ActionInfo;
use crate::core::action::ActionOutcome;
use crate::core::bmc::Bmc;
use crate::core::entity::{Entity, SchemaObject};
use crate::core::error::Error;
use crate::core::json::double_option;
use crate::core::odata::{ActionTarget, Link, Resource};
use crate::core::types::{ResetType, Status, redfish_enum};
use crate::log_service::LogService;

redfish_enum! {
    pub enum ManagerType {
        ManagementController => "ManagementController",
        EnclosureManager => "EnclosureManager",
        Bmc => "BMC",
        RackManager => "RackManager",
        AuxiliaryController => "AuxiliaryController",
        Service => "Service",
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
struct ManagerActions {
    #[serde(rename = "#Manager.Reset", default)]
    reset: Option<ActionTarget>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ManagerData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "ManagerType",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub manager_type: Option<Option<ManagerType>>,
    #[serde(
        rename = "Model",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub model: Option<Option<String>>,
    #[serde(
        rename = "FirmwareVersion",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub firmware_version: Option<Option<String>>,
    #[serde(
        rename = "UUID",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub uuid: Option<Option<String>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "LogServices", default)]
    log_services: Link,
    #[serde(rename = "Actions", default)]
    actions: ManagerActions,
}

impl SchemaObject for ManagerData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type Manager<B> = Entity<B, ManagerData>;

impl<B: Bmc> Manager<B> {
    pub async fn log_services(&self) -> Result<Vec<LogService<B>>, Error<B>> {
        self.collection(&self.raw().log_services).await?.members().await
    }

    /// Invoke `Manager.Reset`, rebooting the controller itself.
    pub async fn reset(&self, reset_type: ResetType) -> Result<ActionOutcome, Error<B>> {
        self.invoke(
            "Manager.Reset",
            self.raw().actions.reset.as_ref(),
            &json!({"ResetType": reset_type}),
        )
        .await
    }

    pub async fn reset_action_info(&self) -> Result<Option<ActionInfo<B>>, Error<B>> {
        self.fetch_optional(
            self.raw()
                .actions
                .reset
                .as_ref()
                .and_then(ActionTarget::action_info),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_manager_decode() {
        let manager: ManagerData = serde_json::from_value(json!({
            "@odata.id": "/redfish/v1/Managers/BMC",
            "@odata.type": "#Manager.v1_19_0.Manager",
            "Id": "BMC",
            "ManagerType": "BMC",
            "FirmwareVersion": "1.45.455b66-rev4",
            "LogServices": {"@odata.id": "/redfish/v1/Managers/BMC/LogServices"},
            "Actions": {
                "#Manager.Reset": {
                    "target": "/redfish/v1/Managers/BMC/Actions/Manager.Reset"
                }
            }
        }))
        .unwrap();
        assert_eq!(manager.manager_type.clone().flatten(), Some(ManagerType::Bmc));
        assert!(manager.actions.reset.as_ref().unwrap().is_supported());
        assert!(manager.actions.reset.as_ref().unwrap().action_info().is_none());
    }

    #[test]
    fn test_manager_without_reset() {
        let manager: ManagerData = serde_json::from_value(json!({"Id": "BMC"})).unwrap();
        assert!(manager.actions.reset.is_none());
        assert!(manager.log_services.is_empty());
    }
}
