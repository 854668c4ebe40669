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

// tests/traversal.rs
// Lazy tree traversal: service root binding, collection paging,
// reference accessors, and schema-drift tolerance.

mod common;

use std::sync::Arc;

use common::MockBmc;
use nv_redfish::ServiceRoot;
use nv_redfish::chassis::{Chassis, ChassisData};
use nv_redfish::computer_system::{Processor, ProcessorData};
use nv_redfish::core::{Entity, Error, ODataId, PowerState};
use serde_json::json;

fn service_root_body() -> serde_json::Value {
    json!({
        "@odata.id": "/redfish/v1/",
        "@odata.type": "#ServiceRoot.v1_16_0.ServiceRoot",
        "Id": "RootService",
        "Name": "Root Service",
        "RedfishVersion": "1.18.0",
        "Systems": {"@odata.id": "/redfish/v1/Systems"},
        "Chassis": {"@odata.id": "/redfish/v1/Chassis"}
    })
}

#[tokio::test]
async fn test_bind_service_root() {
    let bmc = Arc::new(MockBmc::new().with_body("/redfish/v1/", service_root_body()));
    let root = ServiceRoot::new(Arc::clone(&bmc)).await.unwrap();
    assert_eq!(root.raw().redfish_version.as_deref(), Some("1.18.0"));
    assert_eq!(root.uri().as_str(), "/redfish/v1/");
    assert_eq!(bmc.requests().len(), 1);
}

#[tokio::test]
async fn test_collection_paging_preserves_order() {
    let bmc = Arc::new(
        MockBmc::new()
            .with_body("/redfish/v1/", service_root_body())
            .with_body(
                "/redfish/v1/Systems",
                json!({
                    "@odata.id": "/redfish/v1/Systems",
                    "Name": "Computer System Collection",
                    "Members@odata.count": 3,
                    "Members": [
                        {"@odata.id": "/redfish/v1/Systems/1"},
                        {"@odata.id": "/redfish/v1/Systems/2"}
                    ],
                    "Members@odata.nextLink": "/redfish/v1/Systems?$skip=2"
                }),
            )
            .with_body(
                "/redfish/v1/Systems?$skip=2",
                json!({
                    "@odata.id": "/redfish/v1/Systems",
                    "Members": [{"@odata.id": "/redfish/v1/Systems/3"}]
                }),
            )
            .with_body(
                "/redfish/v1/Systems/1",
                json!({"@odata.id": "/redfish/v1/Systems/1", "Id": "1", "Name": "node-1"}),
            )
            .with_body(
                "/redfish/v1/Systems/2",
                json!({"@odata.id": "/redfish/v1/Systems/2", "Id": "2", "Name": "node-2"}),
            )
            .with_body(
                "/redfish/v1/Systems/3",
                json!({"@odata.id": "/redfish/v1/Systems/3", "Id": "3", "Name": "node-3"}),
            ),
    );

    let root = ServiceRoot::new(Arc::clone(&bmc)).await.unwrap();
    let systems = root.systems().await.unwrap();
    assert_eq!(systems.count(), Some(3));

    let ids = systems.member_ids().await.unwrap();
    let uris: Vec<&str> = ids.iter().map(ODataId::as_str).collect();
    assert_eq!(
        uris,
        [
            "/redfish/v1/Systems/1",
            "/redfish/v1/Systems/2",
            "/redfish/v1/Systems/3"
        ]
    );

    let members = root.systems().await.unwrap().members().await.unwrap();
    let names: Vec<&str> = members
        .iter()
        .map(|system| system.raw().base.name.as_str())
        .collect();
    assert_eq!(names, ["node-1", "node-2", "node-3"]);
}

#[tokio::test]
async fn test_absent_service_links_resolve_to_none_without_requests() {
    let bmc = Arc::new(MockBmc::new().with_body("/redfish/v1/", service_root_body()));
    let root = ServiceRoot::new(Arc::clone(&bmc)).await.unwrap();

    assert!(root.update_service().await.unwrap().is_none());
    assert!(root.event_service().await.unwrap().is_none());
    assert!(root.task_service().await.unwrap().is_none());
    assert!(root.job_service().await.unwrap().is_none());
    assert!(root.telemetry_service().await.unwrap().is_none());

    // Only the root GET went out.
    assert_eq!(bmc.requests().len(), 1);
}

#[tokio::test]
async fn test_absent_collection_link_reads_as_empty() {
    let bmc = Arc::new(MockBmc::new().with_body(
        "/redfish/v1/",
        json!({"@odata.id": "/redfish/v1/", "Id": "RootService"}),
    ));
    let root = ServiceRoot::new(Arc::clone(&bmc)).await.unwrap();
    let managers = root.managers().await.unwrap();
    assert!(managers.is_empty());
    assert!(managers.member_ids().await.unwrap().is_empty());
    assert_eq!(bmc.requests().len(), 1);
}

#[tokio::test]
async fn test_sensor_refs_fetch_lazily() {
    let bmc = Arc::new(
        MockBmc::new()
            .with_body(
                "/redfish/v1/Chassis/1U",
                json!({
                    "@odata.id": "/redfish/v1/Chassis/1U",
                    "Id": "1U",
                    "Sensors": {"@odata.id": "/redfish/v1/Chassis/1U/Sensors"}
                }),
            )
            .with_body(
                "/redfish/v1/Chassis/1U/Sensors",
                json!({
                    "@odata.id": "/redfish/v1/Chassis/1U/Sensors",
                    "Members@odata.count": 2,
                    "Members": [
                        {"@odata.id": "/redfish/v1/Chassis/1U/Sensors/CPU1Temp"},
                        {"@odata.id": "/redfish/v1/Chassis/1U/Sensors/PSU0Power"}
                    ]
                }),
            )
            .with_body(
                "/redfish/v1/Chassis/1U/Sensors/CPU1Temp",
                json!({
                    "@odata.id": "/redfish/v1/Chassis/1U/Sensors/CPU1Temp",
                    "Id": "CPU1Temp",
                    "Reading": 54.5,
                    "ReadingUnits": "Cel",
                    "ReadingType": "Temperature"
                }),
            ),
    );

    let chassis: Chassis<MockBmc> =
        Entity::get(Arc::clone(&bmc), "/redfish/v1/Chassis/1U").await.unwrap();
    let sensors = chassis.sensors().await.unwrap();
    assert_eq!(sensors.len(), 2);
    // The refs alone cost one collection GET, no member GETs.
    assert!(bmc.requests_to("GET", "/redfish/v1/Chassis/1U/Sensors/CPU1Temp").is_empty());

    let reading = sensors[0].fetch().await.unwrap();
    assert_eq!(reading.reading.flatten(), Some(54.5));
    assert_eq!(
        bmc.requests_to("GET", "/redfish/v1/Chassis/1U/Sensors/CPU1Temp").len(),
        1
    );
}

#[tokio::test]
async fn test_processor_environment_sensors_in_declared_order() {
    let bmc = Arc::new(
        MockBmc::new()
            .with_body(
                "/redfish/v1/Systems/1/Processors/CPU1",
                json!({
                    "@odata.id": "/redfish/v1/Systems/1/Processors/CPU1",
                    "Id": "CPU1",
                    "ProcessorType": "CPU",
                    "EnvironmentMetrics": {
                        "@odata.id": "/redfish/v1/Systems/1/Processors/CPU1/EnvironmentMetrics"
                    }
                }),
            )
            .with_body(
                "/redfish/v1/Systems/1/Processors/CPU1/EnvironmentMetrics",
                json!({
                    "@odata.id": "/redfish/v1/Systems/1/Processors/CPU1/EnvironmentMetrics",
                    "Id": "EnvironmentMetrics",
                    "TemperatureCelsius": {
                        "DataSourceUri": "/redfish/v1/Chassis/1U/Sensors/CPU1Temp",
                        "Reading": 54.5
                    },
                    "PowerWatts": {
                        "DataSourceUri": "/redfish/v1/Chassis/1U/Sensors/CPU1Power",
                        "Reading": 112.0
                    },
                    "FanSpeedsPercent": [{
                        "DeviceName": "CPU1 Fan",
                        "DataSourceUri": "/redfish/v1/Chassis/1U/Sensors/CPU1Fan",
                        "Reading": 40.0
                    }]
                }),
            ),
    );

    let processor: Processor<MockBmc> =
        Entity::get(Arc::clone(&bmc), "/redfish/v1/Systems/1/Processors/CPU1")
            .await
            .unwrap();
    let sensors = processor.environment_sensors().await.unwrap();
    let uris: Vec<&str> = sensors.iter().map(|sensor| sensor.odata_id().as_str()).collect();
    assert_eq!(
        uris,
        [
            "/redfish/v1/Chassis/1U/Sensors/CPU1Temp",
            "/redfish/v1/Chassis/1U/Sensors/CPU1Power",
            "/redfish/v1/Chassis/1U/Sensors/CPU1Fan"
        ]
    );
}

#[tokio::test]
async fn test_unknown_enum_values_bind_verbatim() {
    let bmc = Arc::new(MockBmc::new().with_body(
        "/redfish/v1/Chassis/1U",
        json!({
            "@odata.id": "/redfish/v1/Chassis/1U",
            "Id": "1U",
            "ChassisType": "HalfRack",
            "PowerState": "Hibernating"
        }),
    ));
    let chassis: Entity<MockBmc, ChassisData> =
        Entity::get(Arc::clone(&bmc), "/redfish/v1/Chassis/1U").await.unwrap();
    assert_eq!(
        chassis.raw().power_state.clone().flatten(),
        Some(PowerState::Other("Hibernating".to_owned()))
    );
    assert_eq!(
        chassis
            .raw()
            .chassis_type
            .clone()
            .flatten()
            .map(|kind| kind.as_str().to_owned()),
        Some("HalfRack".to_owned())
    );
}

#[tokio::test]
async fn test_missing_resource_surfaces_error_envelope() {
    let bmc = Arc::new(MockBmc::new());
    let result: Result<Entity<MockBmc, ProcessorData>, _> =
        Entity::get(Arc::clone(&bmc), "/redfish/v1/Systems/1/Processors/CPU9").await;
    match result {
        Err(Error::Service(err)) => {
            assert_eq!(err.status.as_u16(), 404);
            assert_eq!(err.code, "Base.1.19.ResourceMissingAtURI");
        }
        other => panic!("expected a service error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_uri_is_rejected_before_any_request() {
    let bmc = Arc::new(MockBmc::new());
    let result: Result<Entity<MockBmc, ChassisData>, _> = Entity::get(Arc::clone(&bmc), "  ").await;
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert!(bmc.requests().is_empty());
}
