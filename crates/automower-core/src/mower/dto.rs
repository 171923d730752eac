//! Wire shapes of the mower listing response.

use serde::Deserialize;

use super::model::{Mower, MowerActivity, MowerMode, MowerState, Position};

#[derive(Debug, Deserialize)]
pub(super) struct MowerList {
    pub data: Vec<MowerData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MowerData {
    #[serde(rename = "type")]
    kind: String,
    id: String,
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
struct Attributes {
    system: System,
    battery: Battery,
    mower: Status,
    #[serde(default)]
    positions: Vec<Position>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct System {
    name: String,
    model: String,
    serial_number: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Battery {
    battery_percent: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Status {
    mode: MowerMode,
    activity: MowerActivity,
    state: MowerState,
    error_code: i32,
    error_code_timestamp: i64,
}

impl MowerData {
    pub fn into_mower(self) -> Mower {
        let Attributes {
            system,
            battery,
            mower,
            positions,
        } = self.attributes;

        Mower {
            id: self.id,
            kind: self.kind,
            name: system.name,
            model: system.model,
            serial_number: system.serial_number,
            battery_percent: battery.battery_percent,
            mode: mower.mode,
            activity: mower.activity,
            state: mower.state,
            error_code: mower.error_code,
            error_code_timestamp: mower.error_code_timestamp,
            positions,
        }
    }
}
