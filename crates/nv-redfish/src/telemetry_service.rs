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

//! The telemetry service: metric report definitions, the reports they
//! produce, and threshold triggers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::bmc::Bmc;
use crate::core::entity::{Entity, ReadWrite, SchemaObject};
use crate::core::error::Error;
use crate::core::json::double_option;
use crate::core::odata::{Link, Resource};
use crate::core::types::{Status, redfish_enum};

redfish_enum! {
    pub enum CollectionFunction {
        Average => "Average",
        Maximum => "Maximum",
        Minimum => "Minimum",
        Summation => "Summation",
    }
}

redfish_enum! {
    pub enum MetricReportDefinitionType {
        Periodic => "Periodic",
        OnChange => "OnChange",
        OnRequest => "OnRequest",
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TelemetryServiceData {
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
        rename = "MaxReports",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_reports: Option<Option<i64>>,
    #[serde(
        rename = "MinCollectionInterval",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_collection_interval: Option<Option<String>>,
    #[serde(
        rename = "SupportedCollectionFunctions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub supported_collection_functions: Option<Vec<CollectionFunction>>,
    // Early TelemetryService schemas misspelled the property. Folded
    // into the canonical field by normalize().
    #[serde(rename = "SupportedCollectionFuntions", default, skip_serializing)]
    supported_collection_funtions: Option<Vec<CollectionFunction>>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "MetricReports", default)]
    metric_reports: Link,
    #[serde(rename = "MetricReportDefinitions", default)]
    metric_report_definitions: Link,
    #[serde(rename = "Triggers", default)]
    triggers: Link,
}

impl SchemaObject for TelemetryServiceData {
    fn resource(&self) -> &Resource {
        &self.base
    }

    fn normalize(&mut self) {
        if self.supported_collection_functions.is_none() {
            if let Some(functions) = self.supported_collection_funtions.take() {
                tracing::debug!("accepting misspelled SupportedCollectionFunctions property");
                self.supported_collection_functions = Some(functions);
            }
        }
    }
}

impl ReadWrite for TelemetryServiceData {
    const WRITABLE: &'static [&'static str] = &["ServiceEnabled"];
}

pub type TelemetryService<B> = Entity<B, TelemetryServiceData>;

impl<B: Bmc> TelemetryService<B> {
    pub async fn metric_reports(&self) -> Result<Vec<MetricReport<B>>, Error<B>> {
        self.collection(&self.raw().metric_reports).await?.members().await
    }

    pub async fn metric_report_definitions(
        &self,
    ) -> Result<Vec<MetricReportDefinition<B>>, Error<B>> {
        self.collection(&self.raw().metric_report_definitions)
            .await?
            .members()
            .await
    }

    pub async fn triggers(&self) -> Result<Vec<Trigger<B>>, Error<B>> {
        self.collection(&self.raw().triggers).await?.members().await
    }
}

/// One row in a metric report.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MetricValue {
    #[serde(
        rename = "MetricId",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub metric_id: Option<Option<String>>,
    #[serde(
        rename = "MetricValue",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub metric_value: Option<Option<String>>,
    #[serde(
        rename = "Timestamp",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<Option<DateTime<Utc>>>,
    #[serde(
        rename = "MetricProperty",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub metric_property: Option<Option<String>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MetricReportData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(rename = "ReportSequence", default, skip_serializing_if = "Option::is_none")]
    pub report_sequence: Option<String>,
    #[serde(rename = "Timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "MetricValues", default, skip_serializing_if = "Vec::is_empty")]
    pub metric_values: Vec<MetricValue>,
    #[serde(rename = "MetricReportDefinition", default)]
    metric_report_definition: Link,
}

impl SchemaObject for MetricReportData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type MetricReport<B> = Entity<B, MetricReportData>;

impl<B: Bmc> MetricReport<B> {
    pub async fn definition(&self) -> Result<Option<MetricReportDefinition<B>>, Error<B>> {
        self.follow(&self.raw().metric_report_definition).await
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MetricReportDefinitionData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(
        rename = "MetricReportDefinitionType",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub definition_type: Option<Option<MetricReportDefinitionType>>,
    #[serde(
        rename = "MetricReportDefinitionEnabled",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub enabled: Option<Option<bool>>,
    #[serde(rename = "MetricProperties", default, skip_serializing_if = "Vec::is_empty")]
    pub metric_properties: Vec<String>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl SchemaObject for MetricReportDefinitionData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type MetricReportDefinition<B> = Entity<B, MetricReportDefinitionData>;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TriggerData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(rename = "MetricIds", default, skip_serializing_if = "Vec::is_empty")]
    pub metric_ids: Vec<String>,
    #[serde(rename = "MetricProperties", default, skip_serializing_if = "Vec::is_empty")]
    pub metric_properties: Vec<String>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl SchemaObject for TriggerData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type Trigger<B> = Entity<B, TriggerData>;
