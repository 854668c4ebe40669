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

//! `EnvironmentMetrics`: the per-component roll-up of environmental
//! sensor excerpts that processors, memory, drives, and chassis expose.

use serde::{Deserialize, Serialize};

use crate::core::bmc::Bmc;
use crate::core::entity::{Entity, SchemaObject};
use crate::core::odata::{ODataId, Resource};
use crate::sensor::{SensorExcerpt, SensorRef};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FanSpeedExcerpt {
    #[serde(rename = "DeviceName", default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(flatten)]
    pub excerpt: SensorExcerpt,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EnvironmentMetricsData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "TemperatureCelsius",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature_celsius: Option<SensorExcerpt>,
    #[serde(
        rename = "HumidityPercent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub humidity_percent: Option<SensorExcerpt>,
    #[serde(rename = "PowerWatts", default, skip_serializing_if = "Option::is_none")]
    pub power_watts: Option<SensorExcerpt>,
    #[serde(rename = "EnergykWh", default, skip_serializing_if = "Option::is_none")]
    pub energy_kwh: Option<SensorExcerpt>,
    #[serde(
        rename = "DewPointCelsius",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dew_point_celsius: Option<SensorExcerpt>,
    #[serde(
        rename = "FanSpeedsPercent",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fan_speeds_percent: Vec<FanSpeedExcerpt>,
}

impl EnvironmentMetricsData {
    /// URIs of the full sensors behind every excerpted reading, in
    /// declaration order, skipping excerpts without a source.
    pub fn sensor_uris(&self) -> Vec<&ODataId> {
        let singles = [
            &self.temperature_celsius,
            &self.humidity_percent,
            &self.power_watts,
            &self.energy_kwh,
            &self.dew_point_celsius,
        ];
        let mut uris: Vec<&ODataId> = singles
            .into_iter()
            .flatten()
            .filter_map(SensorExcerpt::data_source_uri)
            .collect();
        uris.extend(
            self.fan_speeds_percent
                .iter()
                .filter_map(|fan| fan.excerpt.data_source_uri()),
        );
        uris
    }
}

impl SchemaObject for EnvironmentMetricsData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type EnvironmentMetrics<B> = Entity<B, EnvironmentMetricsData>;

impl<B: Bmc> EnvironmentMetrics<B> {
    /// Lazy references to the sensors backing the excerpted readings.
    pub fn sensor_refs(&self) -> Vec<SensorRef<B>> {
        self.raw()
            .sensor_uris()
            .into_iter()
            .map(|uri| self.entity_ref(uri))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_sensor_uris_collects_in_order() {
        let metrics: EnvironmentMetricsData = serde_json::from_value(json!({
            "@odata.id": "/redfish/v1/Systems/1/Processors/CPU1/EnvironmentMetrics",
            "Id": "EnvironmentMetrics",
            "TemperatureCelsius": {
                "DataSourceUri": "/redfish/v1/Chassis/1/Sensors/CPU1Temp",
                "Reading": 44.0
            },
            "PowerWatts": {
                "DataSourceUri": "/redfish/v1/Chassis/1/Sensors/CPU1Power",
                "Reading": 115.0
            },
            "FanSpeedsPercent": [
                {"DeviceName": "Fan1", "DataSourceUri": "/redfish/v1/Chassis/1/Sensors/Fan1", "Reading": 40.0},
                {"DeviceName": "Fan2", "Reading": 41.0}
            ]
        }))
        .unwrap();
        let uris: Vec<&str> = metrics.sensor_uris().iter().map(|u| u.as_str()).collect();
        assert_eq!(
            uris,
            vec![
                "/redfish/v1/Chassis/1/Sensors/CPU1Temp",
                "/redfish/v1/Chassis/1/Sensors/CPU1Power",
                "/redfish/v1/Chassis/1/Sensors/Fan1",
            ]
        );
    }

    #[test]
    fn test_no_excerpts_no_uris() {
        let metrics: EnvironmentMetricsData =
            serde_json::from_value(json!({"Id": "EnvironmentMetrics"})).unwrap();
        assert!(metrics.sensor_uris().is_empty());
    }
}
