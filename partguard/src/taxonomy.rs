//! Component Type Taxonomy
//!
//! Closed set of component-type tags. Generic tags describe a kind of part
//! ("op-amp", "current sensor"); manufacturer-specific tags derive from
//! exactly one generic tag and carry its classification flags. Sensor
//! families sit one level below the plain `Sensor` tag, so the longest chain
//! is `CurrentSensorAllegro -> CurrentSensor -> Sensor`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Component type tag
///
/// Manufacturer-specific variants carry the manufacturer as a suffix
/// (`OpAmpTi`, `CurrentSensorAllegro`). `base_type()` of a specific tag is
/// its generic ancestor, a sensor family's base is `Sensor`, and every
/// other generic tag is its own base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    // Passives
    Resistor,
    Capacitor,
    Inductor,
    Crystal,

    // Discretes
    Diode,
    Transistor,
    Mosfet,

    // Integrated circuits
    Ic,
    OpAmp,
    VoltageRegulator,
    Microcontroller,

    // Sensors
    Sensor,
    CurrentSensor,
    HallSensor,
    TemperatureSensor,

    // Electromechanical
    Connector,

    // Manufacturer-specific
    ResistorYageo,
    CapacitorYageo,
    OpAmpTi,
    VoltageRegulatorTi,
    OpAmpSt,
    VoltageRegulatorSt,
    MicrocontrollerSt,
    CurrentSensorAllegro,
    HallSensorAllegro,
}

impl ComponentType {
    /// Every tag, generic tags first
    pub const ALL: &'static [ComponentType] = &[
        ComponentType::Resistor,
        ComponentType::Capacitor,
        ComponentType::Inductor,
        ComponentType::Crystal,
        ComponentType::Diode,
        ComponentType::Transistor,
        ComponentType::Mosfet,
        ComponentType::Ic,
        ComponentType::OpAmp,
        ComponentType::VoltageRegulator,
        ComponentType::Microcontroller,
        ComponentType::Sensor,
        ComponentType::CurrentSensor,
        ComponentType::HallSensor,
        ComponentType::TemperatureSensor,
        ComponentType::Connector,
        ComponentType::ResistorYageo,
        ComponentType::CapacitorYageo,
        ComponentType::OpAmpTi,
        ComponentType::VoltageRegulatorTi,
        ComponentType::OpAmpSt,
        ComponentType::VoltageRegulatorSt,
        ComponentType::MicrocontrollerSt,
        ComponentType::CurrentSensorAllegro,
        ComponentType::HallSensorAllegro,
    ];

    /// Next tag up the hierarchy, or the tag itself at the top
    pub fn base_type(&self) -> ComponentType {
        match self {
            ComponentType::ResistorYageo => ComponentType::Resistor,
            ComponentType::CapacitorYageo => ComponentType::Capacitor,
            ComponentType::OpAmpTi | ComponentType::OpAmpSt => ComponentType::OpAmp,
            ComponentType::VoltageRegulatorTi | ComponentType::VoltageRegulatorSt => {
                ComponentType::VoltageRegulator
            }
            ComponentType::MicrocontrollerSt => ComponentType::Microcontroller,
            ComponentType::CurrentSensorAllegro => ComponentType::CurrentSensor,
            ComponentType::HallSensorAllegro => ComponentType::HallSensor,
            ComponentType::CurrentSensor
            | ComponentType::HallSensor
            | ComponentType::TemperatureSensor => ComponentType::Sensor,
            root => *root,
        }
    }

    /// Top of the hierarchy, reached in at most two `base_type` hops
    pub fn root_type(&self) -> ComponentType {
        self.base_type().base_type()
    }

    pub fn is_generic(&self) -> bool {
        self.manufacturer().is_none()
    }

    /// Manufacturer owning a specific tag; `None` for generic tags
    pub fn manufacturer(&self) -> Option<&'static str> {
        match self {
            ComponentType::ResistorYageo | ComponentType::CapacitorYageo => Some("Yageo"),
            ComponentType::OpAmpTi | ComponentType::VoltageRegulatorTi => {
                Some("Texas Instruments")
            }
            ComponentType::OpAmpSt
            | ComponentType::VoltageRegulatorSt
            | ComponentType::MicrocontrollerSt => Some("STMicroelectronics"),
            ComponentType::CurrentSensorAllegro | ComponentType::HallSensorAllegro => {
                Some("Allegro MicroSystems")
            }
            _ => None,
        }
    }

    pub fn is_passive(&self) -> bool {
        matches!(
            self.base_type(),
            ComponentType::Resistor
                | ComponentType::Capacitor
                | ComponentType::Inductor
                | ComponentType::Crystal
        )
    }

    pub fn is_semiconductor(&self) -> bool {
        matches!(
            self.base_type(),
            ComponentType::Diode
                | ComponentType::Transistor
                | ComponentType::Mosfet
                | ComponentType::Ic
                | ComponentType::OpAmp
                | ComponentType::VoltageRegulator
                | ComponentType::Microcontroller
                | ComponentType::Sensor
                | ComponentType::CurrentSensor
                | ComponentType::HallSensor
                | ComponentType::TemperatureSensor
        )
    }

    /// Get the category of this type
    pub fn category(&self) -> &'static str {
        match self.base_type() {
            ComponentType::Resistor
            | ComponentType::Capacitor
            | ComponentType::Inductor
            | ComponentType::Crystal => "Passive Components",

            ComponentType::Diode | ComponentType::Transistor | ComponentType::Mosfet => {
                "Discrete Semiconductors"
            }

            ComponentType::Ic
            | ComponentType::OpAmp
            | ComponentType::VoltageRegulator
            | ComponentType::Microcontroller => "Integrated Circuits",

            ComponentType::Sensor
            | ComponentType::CurrentSensor
            | ComponentType::HallSensor
            | ComponentType::TemperatureSensor => "Sensors",

            _ => "Electromechanical",
        }
    }

    /// Get a human-readable description of the type
    pub fn description(&self) -> &'static str {
        match self {
            ComponentType::Resistor => "Fixed resistor",
            ComponentType::Capacitor => "Fixed capacitor",
            ComponentType::Inductor => "Inductor or ferrite",
            ComponentType::Crystal => "Quartz crystal",
            ComponentType::Diode => "Diode",
            ComponentType::Transistor => "Bipolar junction transistor",
            ComponentType::Mosfet => "Field-effect transistor",
            ComponentType::Ic => "Integrated circuit",
            ComponentType::OpAmp => "Operational amplifier",
            ComponentType::VoltageRegulator => "Linear voltage regulator",
            ComponentType::Microcontroller => "Microcontroller unit",
            ComponentType::Sensor => "Sensor",
            ComponentType::CurrentSensor => "Current sensor",
            ComponentType::HallSensor => "Hall-effect sensor",
            ComponentType::TemperatureSensor => "Temperature sensor",
            ComponentType::Connector => "Connector",
            ComponentType::ResistorYageo => "Thick-film chip resistor, Yageo",
            ComponentType::CapacitorYageo => "MLCC, Yageo",
            ComponentType::OpAmpTi => "Operational amplifier, Texas Instruments",
            ComponentType::VoltageRegulatorTi => "Linear regulator, Texas Instruments",
            ComponentType::OpAmpSt => "Operational amplifier, STMicroelectronics",
            ComponentType::VoltageRegulatorSt => "Linear regulator, STMicroelectronics",
            ComponentType::MicrocontrollerSt => "STM32 microcontroller, STMicroelectronics",
            ComponentType::CurrentSensorAllegro => "Hall-effect current sensor, Allegro",
            ComponentType::HallSensorAllegro => "Linear Hall sensor, Allegro",
        }
    }

    /// Stable snake_case name, identical to the serde representation
    pub fn name(&self) -> &'static str {
        match self {
            ComponentType::Resistor => "resistor",
            ComponentType::Capacitor => "capacitor",
            ComponentType::Inductor => "inductor",
            ComponentType::Crystal => "crystal",
            ComponentType::Diode => "diode",
            ComponentType::Transistor => "transistor",
            ComponentType::Mosfet => "mosfet",
            ComponentType::Ic => "ic",
            ComponentType::OpAmp => "op_amp",
            ComponentType::VoltageRegulator => "voltage_regulator",
            ComponentType::Microcontroller => "microcontroller",
            ComponentType::Sensor => "sensor",
            ComponentType::CurrentSensor => "current_sensor",
            ComponentType::HallSensor => "hall_sensor",
            ComponentType::TemperatureSensor => "temperature_sensor",
            ComponentType::Connector => "connector",
            ComponentType::ResistorYageo => "resistor_yageo",
            ComponentType::CapacitorYageo => "capacitor_yageo",
            ComponentType::OpAmpTi => "op_amp_ti",
            ComponentType::VoltageRegulatorTi => "voltage_regulator_ti",
            ComponentType::OpAmpSt => "op_amp_st",
            ComponentType::VoltageRegulatorSt => "voltage_regulator_st",
            ComponentType::MicrocontrollerSt => "microcontroller_st",
            ComponentType::CurrentSensorAllegro => "current_sensor_allegro",
            ComponentType::HallSensorAllegro => "hall_sensor_allegro",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unknown component type name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown component type: {0}")]
pub struct UnknownComponentType(pub String);

impl FromStr for ComponentType {
    type Err = UnknownComponentType;

    /// Parse a type name; case, spaces and dashes are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(*c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        ComponentType::ALL
            .iter()
            .copied()
            .find(|t| t.name().replace('_', "") == normalized)
            .ok_or_else(|| UnknownComponentType(s.to_string()))
    }
}
