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

//! `ActionInfo`: the parameter descriptions a service publishes for an
//! action, so callers can learn allowed values before invoking.

use serde::{Deserialize, Serialize};

use crate::core::bmc::Bmc;
use crate::core::entity::{Entity, SchemaObject};
use crate::core::error::Error;
use crate::core::json::double_option;
use crate::core::odata::Resource;
use crate::core::types::redfish_enum;

redfish_enum! {
    pub enum ParameterType {
        Boolean => "Boolean",
        Number => "Number",
        NumberArray => "NumberArray",
        String => "String",
        StringArray => "StringArray",
        Object => "Object",
        ObjectArray => "ObjectArray",
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ActionInfoParameter {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Required", default)]
    pub required: bool,
    #[serde(
        rename = "DataType",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_type: Option<Option<ParameterType>>,
    #[serde(
        rename = "ObjectDataType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub object_data_type: Option<String>,
    #[serde(
        rename = "AllowableValues",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allowable_values: Vec<String>,
    #[serde(
        rename = "AllowablePattern",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub allowable_pattern: Option<String>,
    #[serde(
        rename = "MinimumValue",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub minimum_value: Option<Option<f64>>,
    #[serde(
        rename = "MaximumValue",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub maximum_value: Option<Option<f64>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ActionInfoData {
    #[serde(flatten)]
    pub base: Resource,
    #[serde(rename = "Parameters", default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ActionInfoParameter>,
}

impl ActionInfoData {
    /// First parameter with the given name. A `data_type` filter
    /// additionally requires the declared type to match exactly; pass
    /// `None` to match on name alone. Names compare case-sensitively.
    pub fn parameter(
        &self,
        name: &str,
        data_type: Option<&ParameterType>,
    ) -> Option<&ActionInfoParameter> {
        self.parameters.iter().find(|parameter| {
            parameter.name == name
                && match data_type {
                    None => true,
                    Some(want) => {
                        parameter.data_type.as_ref().and_then(Option::as_ref) == Some(want)
                    }
                }
        })
    }

    pub fn allowed_values(&self, name: &str) -> Option<&[String]> {
        self.parameter(name, None)
            .map(|parameter| parameter.allowable_values.as_slice())
    }
}

impl SchemaObject for ActionInfoData {
    fn resource(&self) -> &Resource {
        &self.base
    }
}

pub type ActionInfo<B> = Entity<B, ActionInfoData>;

impl<B: Bmc> ActionInfo<B> {
    /// Allowed values for `parameter`, e.g. the reset types a system
    /// accepts. Errors when no parameter with that name is declared.
    pub fn allowed_values(&self, parameter: &str) -> Result<Vec<String>, Error<B>> {
        self.raw()
            .allowed_values(parameter)
            .map(<[String]>::to_vec)
            .ok_or_else(|| Error::NotFound(format!("parameter {parameter}")))
    }
}
