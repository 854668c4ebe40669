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

//! `ComputerSystem` and the hardware inventory hanging off it:
//! processors, memory, storage controllers, and drives.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::action_info::ActionInfo;
use crate::core::action::ActionOutcome;
use crate::core::bmc::Bmc;
use crate::core::entity::{Entity, ReadWrite, SchemaObject};
use crate::core::error::Error;
use crate::core::json::double_option;
use crate::core::odata::{ActionTarget, Link, LinkList, ODataId, Resource};
use crate::core::types::{PowerState, ResetType, Status, redfish_enum};
use crate::environment_metrics::EnvironmentMetricsData;
use crate::log_service::LogService;
use crate::sensor::{SensorExcerpt, SensorRef};

redfish_enum! {
    pub enum SystemType {
        Physical => "Physical",
        Virtual => "Virtual",
        Os => "OS",
        PhysicallyPartitioned => "PhysicallyPartitioned",
        VirtuallyPartitioned => "VirtuallyPartitioned",
        Composed => "Composed",
        Dpu => "DPU",
    }
}

redfish_enum! {
    pub enum IndicatorLed {
        Unknown => "Unknown",
        Lit => "Lit",
        Blinking => "Blinking",
        Off => "Off",
    }
}

redfish_enum! {
    pub enum PowerRestorePolicy {
        AlwaysOn => "AlwaysOn",
        AlwaysOff => "AlwaysOff",
        LastState => "LastState",
    }
}

redfish_enum! {
    pub enum ProcessorType {
        Cpu => "CPU",
        Gpu => "GPU",
        Fpga => "FPGA",
        Dsp => "DSP",
        Accelerator => "Accelerator",
        Core => "Core",
        Thread => "Thread",
        Partition => "Partition",
        Oem => "OEM",
    }
}

redfish_enum! {
    pub enum MemoryDeviceType {
        Ddr => "DDR",
        Ddr4 => "DDR4",
        Ddr4Sdram => "DDR4_SDRAM",
        Ddr5 => "DDR5",
        Hbm => "HBM",
        Hbm2 => "HBM2",
        Hbm2e => "HBM2E",
        Hbm3 => "HBM3",
        NvdimmN => "NVDIMM_N",
        Rom => "ROM",
        Sdram => "SDRAM",
    }
}

redfish_enum! {
    pub enum MediaType {
        Hdd => "HDD",
        Ssd => "SSD",
        Smr => "SMR",
    }
}

redfish_enum! {
    pub enum BootSourceOverrideEnabled {
        Disabled => "Disabled",
        Once => "Once",
        Continuous => "Continuous",
    }
}

redfish_enum! {
    pub enum BootSource {
        None => "None",
        Pxe => "Pxe",
        Floppy => "Floppy",
        Cd => "Cd",
        Usb => "Usb",
        Hdd => "Hdd",
        BiosSetup => "BiosSetup",
        Utilities => "Utilities",
        Diags => "Diags",
        UefiShell => "UefiShell",
        UefiTarget => "UefiTarget",
        SdCard => "SDCard",
        UefiHttp => "UefiHttp",
    }
}

redfish_enum! {
    pub enum BootSourceOverrideMode {
        Legacy => "Legacy",
        Uefi => "UEFI",
    }
}

/// Boot source override settings. Writable as a unit: a change to any
/// member sends the whole `Boot` object.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Boot {
    #[serde(
        rename = "BootSourceOverrideEnabled",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub boot_source_override_enabled: Option<Option<BootSourceOverrideEnabled>>,
    #[serde(
        rename = "BootSourceOverrideTarget",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub boot_source_override_target: Option<Option<BootSource>>,
    #[serde(
        rename = "BootSourceOverrideMode",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub boot_source_override_mode: Option<Option<BootSourceOverrideMode>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MemorySummary {
    #[serde(
        rename = "TotalSystemMemoryGiB",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_system_memory_gib: Option<Option<f64>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProcessorSummary {
    #[serde(
        rename = "Count",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub count: Option<Option<i64>>,
    #[serde(
        rename = "Model",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub model: Option<Option<String>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
struct ComputerSystemActions {
    #[serde(rename = "#ComputerSystem.Reset", default)]
    reset: Option<ActionTarget>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ComputerSystemData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "SystemType",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub system_type: Option<Option<SystemType>>,
    #[serde(
        rename = "AssetTag",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub asset_tag: Option<Option<String>>,
    #[serde(
        rename = "HostName",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub host_name: Option<Option<String>>,
    #[serde(
        rename = "IndicatorLED",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub indicator_led: Option<Option<IndicatorLed>>,
    #[serde(
        rename = "PowerState",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub power_state: Option<Option<PowerState>>,
    #[serde(
        rename = "PowerRestorePolicy",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub power_restore_policy: Option<Option<PowerRestorePolicy>>,
    #[serde(rename = "Boot", default, skip_serializing_if = "Option::is_none")]
    pub boot: Option<Boot>,
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
        rename = "SKU",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sku: Option<Option<String>>,
    #[serde(
        rename = "SerialNumber",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub serial_number: Option<Option<String>>,
    #[serde(
        rename = "UUID",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub uuid: Option<Option<String>>,
    #[serde(
        rename = "BiosVersion",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub bios_version: Option<Option<String>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "MemorySummary", default, skip_serializing_if = "Option::is_none")]
    pub memory_summary: Option<MemorySummary>,
    #[serde(
        rename = "ProcessorSummary",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub processor_summary: Option<ProcessorSummary>,
    #[serde(rename = "Processors", default)]
    processors: Link,
    #[serde(rename = "Memory", default)]
    memory: Link,
    #[serde(rename = "Storage", default)]
    storage: Link,
    #[serde(rename = "LogServices", default)]
    log_services: Link,
    #[serde(rename = "Actions", default)]
    actions: ComputerSystemActions,
}

impl SchemaObject for ComputerSystemData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

impl ReadWrite for ComputerSystemData {
    const WRITABLE: &'static [&'static str] = &[
        "AssetTag",
        "Boot",
        "HostName",
        "IndicatorLED",
        "PowerRestorePolicy",
    ];
}

pub type ComputerSystem<B> = Entity<B, ComputerSystemData>;

impl<B: Bmc> ComputerSystem<B> {
    pub async fn processors(&self) -> Result<Vec<Processor<B>>, Error<B>> {
        self.collection(&self.raw().processors).await?.members().await
    }

    pub async fn memory_modules(&self) -> Result<Vec<Memory<B>>, Error<B>> {
        self.collection(&self.raw().memory).await?.members().await
    }

    pub async fn storage_controllers(&self) -> Result<Vec<Storage<B>>, Error<B>> {
        self.collection(&self.raw().storage).await?.members().await
    }

    pub async fn log_services(&self) -> Result<Vec<LogService<B>>, Error<B>> {
        self.collection(&self.raw().log_services).await?.members().await
    }

    /// Invoke `ComputerSystem.Reset`. Unsupported on systems that do not
    /// advertise the action.
    pub async fn reset(&self, reset_type: ResetType) -> Result<ActionOutcome, Error<B>> {
        self.invoke(
            "ComputerSystem.Reset",
            self.raw().actions.reset.as_ref(),
            &json!({"ResetType": reset_type}),
        )
        .await
    }

    /// Parameter descriptions for the reset action, when the system
    /// publishes them.
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

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProcessorData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "ProcessorType",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub processor_type: Option<Option<ProcessorType>>,
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
        rename = "Socket",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub socket: Option<Option<String>>,
    #[serde(
        rename = "MaxSpeedMHz",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_speed_mhz: Option<Option<i64>>,
    #[serde(
        rename = "TotalCores",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_cores: Option<Option<i64>>,
    #[serde(
        rename = "TotalThreads",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_threads: Option<Option<i64>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "EnvironmentMetrics", default)]
    environment_metrics: Link,
    #[serde(rename = "Metrics", default)]
    metrics: Link,
}

impl SchemaObject for ProcessorData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type Processor<B> = Entity<B, ProcessorData>;

impl<B: Bmc> Processor<B> {
    /// Sensors excerpted into this processor's environment metrics.
    pub async fn environment_sensors(&self) -> Result<Vec<SensorRef<B>>, Error<B>> {
        Ok(self
            .follow::<EnvironmentMetricsData>(&self.raw().environment_metrics)
            .await?
            .map(|metrics| metrics.sensor_refs())
            .unwrap_or_default())
    }

    /// Sensors excerpted into the processor metrics resource.
    pub async fn metrics_sensors(&self) -> Result<Vec<SensorRef<B>>, Error<B>> {
        Ok(self
            .follow::<ProcessorMetricsData>(&self.raw().metrics)
            .await?
            .map(|metrics| metrics.sensor_refs())
            .unwrap_or_default())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProcessorMetricsData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(rename = "CoreVoltage", default, skip_serializing_if = "Option::is_none")]
    pub core_voltage: Option<SensorExcerpt>,
    #[serde(
        rename = "TemperatureCelsius",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature_celsius: Option<SensorExcerpt>,
}

impl ProcessorMetricsData {
    pub fn sensor_uris(&self) -> Vec<&ODataId> {
        [&self.core_voltage, &self.temperature_celsius]
            .into_iter()
            .flatten()
            .filter_map(SensorExcerpt::data_source_uri)
            .collect()
    }
}

impl SchemaObject for ProcessorMetricsData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type ProcessorMetrics<B> = Entity<B, ProcessorMetricsData>;

impl<B: Bmc> ProcessorMetrics<B> {
    pub fn sensor_refs(&self) -> Vec<SensorRef<B>> {
        self.raw()
            .sensor_uris()
            .into_iter()
            .map(|uri| self.entity_ref(uri))
            .collect()
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MemoryData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "MemoryDeviceType",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub memory_device_type: Option<Option<MemoryDeviceType>>,
    #[serde(
        rename = "CapacityMiB",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity_mib: Option<Option<i64>>,
    #[serde(
        rename = "OperatingSpeedMhz",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub operating_speed_mhz: Option<Option<i64>>,
    #[serde(
        rename = "Manufacturer",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub manufacturer: Option<Option<String>>,
    #[serde(
        rename = "PartNumber",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub part_number: Option<Option<String>>,
    #[serde(
        rename = "SerialNumber",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub serial_number: Option<Option<String>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "EnvironmentMetrics", default)]
    environment_metrics: Link,
}

impl SchemaObject for MemoryData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type Memory<B> = Entity<B, MemoryData>;

impl<B: Bmc> Memory<B> {
    pub async fn environment_sensors(&self) -> Result<Vec<SensorRef<B>>, Error<B>> {
        Ok(self
            .follow::<EnvironmentMetricsData>(&self.raw().environment_metrics)
            .await?
            .map(|metrics| metrics.sensor_refs())
            .unwrap_or_default())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StorageData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "Drives", default)]
    drives: LinkList,
}

impl SchemaObject for StorageData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type Storage<B> = Entity<B, StorageData>;

impl<B: Bmc> Storage<B> {
    /// The drives attached to this controller, in declared order.
    pub async fn drives(&self) -> Result<Vec<Drive<B>>, Error<B>> {
        self.follow_many(&self.raw().drives).await
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DriveData {
    #[serde(flatten)]
    pub base: Resource,
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
        rename = "CapacityBytes",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity_bytes: Option<Option<i64>>,
    #[serde(
        rename = "MediaType",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_type: Option<Option<MediaType>>,
    #[serde(
        rename = "FailurePredicted",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub failure_predicted: Option<Option<bool>>,
    #[serde(
        rename = "PredictedMediaLifeLeftPercent",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub predicted_media_life_left_percent: Option<Option<f64>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "EnvironmentMetrics", default)]
    environment_metrics: Link,
}

impl SchemaObject for DriveData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type Drive<B> = Entity<B, DriveData>;

impl<B: Bmc> Drive<B> {
    pub async fn environment_sensors(&self) -> Result<Vec<SensorRef<B>>, Error<B>> {
        Ok(self
            .follow::<EnvironmentMetricsData>(&self.raw().environment_metrics)
            .await?
            .map(|metrics| metrics.sensor_refs())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_system_decode() {
        let system: ComputerSystemData = serde_json::from_value(json!({
            "@odata.id": "/redfish/v1/Systems/1",
            "@odata.type": "#ComputerSystem.v1_20_1.ComputerSystem",
            "Id": "1",
            "Name": "System One",
            "SystemType": "Physical",
            "PowerState": "On",
            "AssetTag": "rack-12-slot-3",
            "UUID": "38947555-7742-3448-3784-823347823834",
            "Status": {"State": "Enabled", "Health": "OK"},
            "Boot": {
                "BootSourceOverrideEnabled": "Once",
                "BootSourceOverrideTarget": "Pxe",
                "BootSourceOverrideMode": "UEFI"
            },
            "MemorySummary": {"TotalSystemMemoryGiB": 1024.0},
            "ProcessorSummary": {"Count": 2, "Model": "GH200"},
            "Processors": {"@odata.id": "/redfish/v1/Systems/1/Processors"},
            "Memory": {"@odata.id": "/redfish/v1/Systems/1/Memory"},
            "Actions": {
                "#ComputerSystem.Reset": {
                    "target": "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset",
                    "@Redfish.ActionInfo": "/redfish/v1/Systems/1/ResetActionInfo"
                }
            }
        }))
        .unwrap();
        assert_eq!(system.power_state.clone().flatten(), Some(PowerState::On));
        assert_eq!(system.asset_tag.clone().flatten().as_deref(), Some("rack-12-slot-3"));
        let boot = system.boot.as_ref().unwrap();
        assert_eq!(
            boot.boot_source_override_target.clone().flatten(),
            Some(BootSource::Pxe)
        );
        assert_eq!(
            boot.boot_source_override_mode.clone().flatten(),
            Some(BootSourceOverrideMode::Uefi)
        );
        assert!(system.actions.reset.as_ref().unwrap().is_supported());
        assert_eq!(
            system
                .memory_summary
                .as_ref()
                .unwrap()
                .total_system_memory_gib
                .flatten(),
            Some(1024.0)
        );
    }

    #[test]
    fn test_system_without_actions_has_unsupported_reset() {
        let system: ComputerSystemData =
            serde_json::from_value(json!({"Id": "1"})).unwrap();
        assert!(system.actions.reset.is_none());
    }

    #[test]
    fn test_storage_drives_list() {
        let storage: StorageData = serde_json::from_value(json!({
            "@odata.id": "/redfish/v1/Systems/1/Storage/NVMe",
            "Id": "NVMe",
            "Drives": [
                {"@odata.id": "/redfish/v1/Systems/1/Storage/NVMe/Drives/0"},
                {"@odata.id": "/redfish/v1/Systems/1/Storage/NVMe/Drives/1"}
            ]
        }))
        .unwrap();
        assert_eq!(storage.drives.len(), 2);
    }

    #[test]
    fn test_processor_metrics_sensor_uris() {
        let metrics: ProcessorMetricsData = serde_json::from_value(json!({
            "Id": "Metrics",
            "CoreVoltage": {"DataSourceUri": "/redfish/v1/Chassis/1/Sensors/CPU1Voltage", "Reading": 0.9}
        }))
        .unwrap();
        assert_eq!(metrics.sensor_uris().len(), 1);
    }

    #[test]
    fn test_unknown_memory_device_type_preserved() {
        let memory: MemoryData = serde_json::from_value(json!({
            "Id": "DIMM0",
            "MemoryDeviceType": "HBM4"
        }))
        .unwrap();
        assert_eq!(
            memory.memory_device_type.flatten(),
            Some(MemoryDeviceType::Other("HBM4".to_owned()))
        );
    }
}
