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

//! `Chassis` resources: the physical enclosure view, its sensor
//! collection, and the power subsystem beneath it.

use serde::{Deserialize, Serialize};

use crate::core::bmc::Bmc;
use crate::core::entity::{Entity, ReadWrite, SchemaObject};
use crate::core::error::Error;
use crate::core::json::double_option;
use crate::core::odata::{Link, ODataId, Resource};
use crate::core::types::{PowerState, Status, redfish_enum};
use crate::environment_metrics::EnvironmentMetricsData;
use crate::sensor::{SensorData, SensorExcerpt, SensorRef};

redfish_enum! {
    pub enum ChassisType {
        Rack => "Rack",
        Blade => "Blade",
        Enclosure => "Enclosure",
        StandAlone => "StandAlone",
        RackMount => "RackMount",
        Card => "Card",
        Expansion => "Expansion",
        Sidecar => "Sidecar",
        Zone => "Zone",
        Sled => "Sled",
        Shelf => "Shelf",
        Drawer => "Drawer",
        Module => "Module",
        Component => "Component",
        StorageEnclosure => "StorageEnclosure",
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ChassisData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "ChassisType",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub chassis_type: Option<Option<ChassisType>>,
    #[serde(
        rename = "AssetTag",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub asset_tag: Option<Option<String>>,
    #[serde(
        rename = "Manufacturer",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub manufacturer: Option<Option<String>>,
    #[serde(
        rename = "Model",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub model: Option<Option<String>>,
    #[serde(
        rename = "SerialNumber",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub serial_number: Option<Option<String>>,
    #[serde(
        rename = "PartNumber",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub part_number: Option<Option<String>>,
    #[serde(
        rename = "PowerState",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub power_state: Option<Option<PowerState>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "Sensors", default)]
    sensors: Link,
    #[serde(rename = "PowerSubsystem", default)]
    power_subsystem: Link,
    #[serde(rename = "EnvironmentMetrics", default)]
    environment_metrics: Link,
}

impl SchemaObject for ChassisData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

impl ReadWrite for ChassisData {
    const WRITABLE: &'static [&'static str] = &["AssetTag"];
}

pub type Chassis<B> = Entity<B, ChassisData>;

impl<B: Bmc> Chassis<B> {
    /// References to every sensor in this chassis. Each entry fetches
    /// its reading on demand.
    pub async fn sensors(&self) -> Result<Vec<SensorRef<B>>, Error<B>> {
        self.collection::<SensorData>(&self.raw().sensors)
            .await?
            .member_refs()
            .await
    }

    pub async fn power_supplies(&self) -> Result<Vec<PowerSupply<B>>, Error<B>> {
        let Some(subsystem) = self
            .follow::<PowerSubsystemData>(&self.raw().power_subsystem)
            .await?
        else {
            return Ok(Vec::new());
        };
        subsystem
            .collection(&subsystem.raw().power_supplies)
            .await?
            .members()
            .await
    }

    pub async fn environment_sensors(&self) -> Result<Vec<SensorRef<B>>, Error<B>> {
        Ok(self
            .follow::<EnvironmentMetricsData>(&self.raw().environment_metrics)
            .await?
            .map(|metrics| metrics.sensor_refs())
            .unwrap_or_default())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PowerSubsystemData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "CapacityWatts",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity_watts: Option<Option<f64>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "PowerSupplies", default)]
    power_supplies: Link,
}

impl SchemaObject for PowerSubsystemData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type PowerSubsystem<B> = Entity<B, PowerSubsystemData>;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PowerSupplyData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "Manufacturer",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub manufacturer: Option<Option<String>>,
    #[serde(
        rename = "Model",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub model: Option<Option<String>>,
    #[serde(
        rename = "SerialNumber",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub serial_number: Option<Option<String>>,
    #[serde(
        rename = "PartNumber",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub part_number: Option<Option<String>>,
    #[serde(
        rename = "FirmwareVersion",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub firmware_version: Option<Option<String>>,
    #[serde(
        rename = "PowerCapacityWatts",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub power_capacity_watts: Option<Option<f64>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "Metrics", default)]
    metrics: Link,
}

impl SchemaObject for PowerSupplyData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type PowerSupply<B> = Entity<B, PowerSupplyData>;

impl<B: Bmc> PowerSupply<B> {
    /// Sensors excerpted into the supply's metrics resource.
    pub async fn metrics_sensors(&self) -> Result<Vec<SensorRef<B>>, Error<B>> {
        Ok(self
            .follow::<PowerSupplyMetricsData>(&self.raw().metrics)
            .await?
            .map(|metrics| metrics.sensor_refs())
            .unwrap_or_default())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PowerSupplyMetricsData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(rename = "InputVoltage", default, skip_serializing_if = "Option::is_none")]
    pub input_voltage: Option<SensorExcerpt>,
    #[serde(
        rename = "InputCurrentAmps",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_current_amps: Option<SensorExcerpt>,
    #[serde(
        rename = "InputPowerWatts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_power_watts: Option<SensorExcerpt>,
    #[serde(
        rename = "OutputPowerWatts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub output_power_watts: Option<SensorExcerpt>,
    #[serde(
        rename = "TemperatureCelsius",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature_celsius: Option<SensorExcerpt>,
}

impl PowerSupplyMetricsData {
    pub fn sensor_uris(&self) -> Vec<&ODataId> {
        [
            &self.input_voltage,
            &self.input_current_amps,
            &self.input_power_watts,
            &self.output_power_watts,
            &self.temperature_celsius,
        ]
        .into_iter()
        .flatten()
        .filter_map(SensorExcerpt::data_source_uri)
        .collect()
    }
}

impl SchemaObject for PowerSupplyMetricsData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type PowerSupplyMetrics<B> = Entity<B, PowerSupplyMetricsData>;

impl<B: Bmc> PowerSupplyMetrics<B> {
    pub fn sensor_refs(&self) -> Vec<SensorRef<B>> {
        self.raw()
            .sensor_uris()
            .into_iter()
            .map(|uri| self.entity_ref(uri))
            .collect()
    }
}
