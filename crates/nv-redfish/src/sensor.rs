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

//! The `Sensor` schema: unified telemetry readings with thresholds, plus
//! the excerpt form other resources embed to point at their sensors.

use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, EntityTypeRef, SchemaObject};
use crate::core::json::double_option;
use crate::core::odata::{ODataId, Resource};
use crate::core::types::{Status, redfish_enum};

redfish_enum! {
    /// What a sensor measures.
    pub enum ReadingType {
        Temperature => "Temperature",
        Humidity => "Humidity",
        Power => "Power",
        EnergyJoules => "EnergyJoules",
        EnergykWh => "EnergykWh",
        ChargeAh => "ChargeAh",
        Voltage => "Voltage",
        Current => "Current",
        Frequency => "Frequency",
        Pressure => "Pressure",
        Rotational => "Rotational",
        AirFlow => "AirFlow",
        LiquidFlow => "LiquidFlow",
        Barometric => "Barometric",
        Altitude => "Altitude",
        Percent => "Percent",
        Heat => "Heat",
    }
}

redfish_enum! {
    /// Where in the machine the measured phenomenon lives.
    pub enum PhysicalContext {
        Room => "Room",
        Intake => "Intake",
        Exhaust => "Exhaust",
        Front => "Front",
        Back => "Back",
        Upper => "Upper",
        Lower => "Lower",
        Cpu => "CPU",
        CpuSubsystem => "CPUSubsystem",
        Gpu => "GPU",
        GpuSubsystem => "GPUSubsystem",
        Fpga => "FPGA",
        Asic => "ASIC",
        Backplane => "Backplane",
        SystemBoard => "SystemBoard",
        PowerSupply => "PowerSupply",
        PowerSubsystem => "PowerSubsystem",
        VoltageRegulator => "VoltageRegulator",
        Battery => "Battery",
        Dimm => "DIMM",
        Memory => "Memory",
        MemorySubsystem => "MemorySubsystem",
        Chassis => "Chassis",
        Fan => "Fan",
        CoolingSubsystem => "CoolingSubsystem",
        LiquidInlet => "LiquidInlet",
        LiquidOutlet => "LiquidOutlet",
        NetworkingDevice => "NetworkingDevice",
        StorageDevice => "StorageDevice",
        TrustedModule => "TrustedModule",
    }
}

redfish_enum! {
    /// Direction of travel that arms a threshold.
    pub enum ThresholdActivation {
        Increasing => "Increasing",
        Decreasing => "Decreasing",
        Either => "Either",
        Disabled => "Disabled",
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Threshold {
    #[serde(
        rename = "Reading",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading: Option<Option<f64>>,
    #[serde(
        rename = "Activation",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub activation: Option<Option<ThresholdActivation>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Thresholds {
    #[serde(rename = "UpperCaution", default, skip_serializing_if = "Option::is_none")]
    pub upper_caution: Option<Threshold>,
    #[serde(rename = "UpperCritical", default, skip_serializing_if = "Option::is_none")]
    pub upper_critical: Option<Threshold>,
    #[serde(rename = "UpperFatal", default, skip_serializing_if = "Option::is_none")]
    pub upper_fatal: Option<Threshold>,
    #[serde(rename = "LowerCaution", default, skip_serializing_if = "Option::is_none")]
    pub lower_caution: Option<Threshold>,
    #[serde(rename = "LowerCritical", default, skip_serializing_if = "Option::is_none")]
    pub lower_critical: Option<Threshold>,
    #[serde(rename = "LowerFatal", default, skip_serializing_if = "Option::is_none")]
    pub lower_fatal: Option<Threshold>,
}

/// One sensor reading with its static characteristics.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SensorData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "Reading",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading: Option<Option<f64>>,
    #[serde(
        rename = "ReadingUnits",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading_units: Option<Option<String>>,
    #[serde(
        rename = "ReadingType",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading_type: Option<Option<ReadingType>>,
    #[serde(
        rename = "PhysicalContext",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub physical_context: Option<Option<PhysicalContext>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "Thresholds", default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Thresholds>,
    #[serde(
        rename = "ReadingRangeMax",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading_range_max: Option<Option<f64>>,
    #[serde(
        rename = "ReadingRangeMin",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading_range_min: Option<Option<f64>>,
    #[serde(
        rename = "Accuracy",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub accuracy: Option<Option<f64>>,
}

impl SchemaObject for SensorData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type Sensor<B> = Entity<B, SensorData>;
pub type SensorRef<B> = EntityTypeRef<B, SensorData>;

/// The embedded form of a sensor: a point-in-time reading plus the URI
/// of the full sensor resource it was excerpted from.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SensorExcerpt {
    #[serde(rename = "DataSourceUri", default, skip_serializing_if = "Option::is_none")]
    data_source_uri: Option<ODataId>,
    #[serde(
        rename = "Reading",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading: Option<Option<f64>>,
}

impl SensorExcerpt {
    /// URI of the backing sensor, when the service declared one.
    pub fn data_source_uri(&self) -> Option<&ODataId> {
        self.data_source_uri.as_ref().filter(|uri| !uri.is_empty())
    }
}
