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

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::core::json::double_option;

/// Conversion of PascalCase schema vocabulary into snake_case, used to
/// derive stable metric and label names from enum values.
pub trait ToSnakeCase {
    fn to_snake_case(&self) -> Cow<'_, str>;
}

impl ToSnakeCase for str {
    fn to_snake_case(&self) -> Cow<'_, str> {
        snake_case(self)
    }
}

pub fn snake_case(value: &str) -> Cow<'_, str> {
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Cow::Borrowed(value);
    }
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1);
            let after_word = prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
            let acronym_end = prev.is_some_and(|p| p.is_ascii_uppercase())
                && next.is_some_and(|n| n.is_ascii_lowercase());
            if after_word || acronym_end {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

// Declares a string-backed enum for a schema-defined value set. The sets
// are open: servers running newer schema versions emit values outside the
// published constants, and those must decode without loss, so every enum
// carries an Other variant preserving the wire string verbatim.
macro_rules! redfish_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $json:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Value outside the published set, preserved verbatim.
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $json, )+
                    Self::Other(value) => value,
                }
            }
        }

        impl ::std::convert::From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $json => Self::$variant, )+
                    _ => Self::Other(value),
                }
            }
        }

        impl ::std::convert::From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_owned()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::core::types::ToSnakeCase for $name {
            fn to_snake_case(&self) -> ::std::borrow::Cow<'_, str> {
                $crate::core::types::snake_case(self.as_str())
            }
        }
    };
}

pub(crate) use redfish_enum;

redfish_enum! {
    /// Health of a resource or its subtree.
    pub enum Health {
        Ok => "OK",
        Warning => "Warning",
        Critical => "Critical",
    }
}

redfish_enum! {
    /// Availability state of a resource.
    pub enum State {
        Enabled => "Enabled",
        Disabled => "Disabled",
        StandbyOffline => "StandbyOffline",
        StandbySpare => "StandbySpare",
        InTest => "InTest",
        Starting => "Starting",
        Absent => "Absent",
        UnavailableOffline => "UnavailableOffline",
        Deferring => "Deferring",
        Quiesced => "Quiesced",
        Updating => "Updating",
        Qualified => "Qualified",
    }
}

redfish_enum! {
    pub enum PowerState {
        On => "On",
        Off => "Off",
        PoweringOn => "PoweringOn",
        PoweringOff => "PoweringOff",
        Paused => "Paused",
    }
}

redfish_enum! {
    /// Kind of reset accepted by `Reset` actions on systems, managers,
    /// and chassis.
    pub enum ResetType {
        On => "On",
        ForceOff => "ForceOff",
        GracefulShutdown => "GracefulShutdown",
        GracefulRestart => "GracefulRestart",
        ForceRestart => "ForceRestart",
        Nmi => "Nmi",
        ForceOn => "ForceOn",
        PushPowerButton => "PushPowerButton",
        PowerCycle => "PowerCycle",
        Suspend => "Suspend",
        Resume => "Resume",
    }
}

/// Status sub-object carried by nearly every resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Status {
    #[serde(
        rename = "Health",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub health: Option<Option<Health>>,
    #[serde(
        rename = "HealthRollup",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub health_rollup: Option<Option<Health>>,
    #[serde(
        rename = "State",
        default,
        with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<Option<State>>,
}

/// One message record, as carried by task and job results and by the
/// `@Message.ExtendedInfo` array of error responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    #[serde(rename = "MessageId", default)]
    pub message_id: String,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "MessageArgs", default)]
    pub message_args: Vec<String>,
    #[serde(rename = "RelatedProperties", default)]
    pub related_properties: Vec<String>,
    #[serde(rename = "Severity", default)]
    pub severity: String,
    #[serde(rename = "Resolution", default)]
    pub resolution: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_simple() {
        assert_eq!(snake_case("Temperature"), "temperature");
        assert_eq!(snake_case("UpperCritical"), "upper_critical");
    }

    #[test]
    fn test_snake_case_acronyms() {
        assert_eq!(snake_case("CPU"), "cpu");
        assert_eq!(snake_case("CPUSubsystem"), "cpu_subsystem");
        assert_eq!(snake_case("DDR5"), "ddr5");
    }

    #[test]
    fn test_snake_case_lowercase_is_borrowed() {
        assert!(matches!(snake_case("fan_1"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_enum_known_value_round_trip() {
        let health: Health = serde_json::from_str("\"OK\"").unwrap();
        assert_eq!(health, Health::Ok);
        assert_eq!(serde_json::to_string(&health).unwrap(), "\"OK\"");
    }

    #[test]
    fn test_enum_unknown_value_preserved_verbatim() {
        let health: Health = serde_json::from_str("\"Degraded\"").unwrap();
        assert_eq!(health, Health::Other("Degraded".to_owned()));
        assert_eq!(serde_json::to_string(&health).unwrap(), "\"Degraded\"");
    }

    #[test]
    fn test_status_null_health_is_present_null() {
        let status: Status = serde_json::from_str(r#"{"Health": null, "State": "Enabled"}"#).unwrap();
        assert_eq!(status.health, Some(None));
        assert_eq!(status.health_rollup, None);
        assert_eq!(status.state, Some(Some(State::Enabled)));
    }
}
