//! Mower domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operating mode of a mower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MowerMode {
    /// Mowing the main work area.
    MainArea,
    /// Mowing a secondary area.
    SecondaryArea,
    /// Staying in the charging station.
    Home,
    /// Demo mode.
    Demo,
    /// Mode reported as unknown by the mower.
    Unknown,
}

/// What a mower is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MowerActivity {
    /// Activity reported as unknown by the mower.
    Unknown,
    /// Manual start required, or the mower is off.
    NotApplicable,
    /// Cutting grass.
    Mowing,
    /// Returning to the charging station.
    GoingHome,
    /// Charging in the station.
    Charging,
    /// Leaving the station.
    Leaving,
    /// Parked in the charging station.
    ParkedInCs,
    /// Stopped somewhere in the garden.
    StoppedInGarden,
}

/// Overall state of a mower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MowerState {
    /// State reported as unknown by the mower.
    Unknown,
    /// No state applies.
    NotApplicable,
    /// Paused by the user.
    Paused,
    /// Working as scheduled.
    InOperation,
    /// Downloading new firmware.
    WaitUpdating,
    /// Booting.
    WaitPowerUp,
    /// Prevented from mowing by the schedule or an override.
    Restricted,
    /// Switched off.
    Off,
    /// Stopped and needs manual action.
    Stopped,
    /// An error occurred.
    Error,
    /// An error that needs service.
    FatalError,
    /// An error occurred while powering up.
    ErrorAtPowerUp,
}

impl MowerState {
    /// Returns true for the three error states.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error | Self::FatalError | Self::ErrorAtPowerUp)
    }
}

/// A GPS position reported by a mower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// A mower and its last reported status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mower {
    /// Mower identifier.
    pub id: String,
    /// Resource type, "mower" for every record the API returns today.
    pub kind: String,
    /// User-given name.
    pub name: String,
    /// Model name.
    pub model: String,
    /// Serial number.
    pub serial_number: u64,
    /// Battery level, 0-100.
    pub battery_percent: u8,
    /// Operating mode.
    pub mode: MowerMode,
    /// Current activity.
    pub activity: MowerActivity,
    /// Overall state.
    pub state: MowerState,
    /// Last error code, 0 when none.
    pub error_code: i32,
    /// When the last error occurred, in milliseconds since the epoch, 0 when none.
    pub error_code_timestamp: i64,
    /// Recent positions, most recent first.
    pub positions: Vec<Position>,
}

impl Mower {
    /// Time of the last error, if one was recorded.
    #[must_use]
    pub fn error_time(&self) -> Option<DateTime<Utc>> {
        if self.error_code_timestamp == 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.error_code_timestamp)
    }

    /// Most recent position, if any.
    #[must_use]
    pub fn latest_position(&self) -> Option<&Position> {
        self.positions.first()
    }
}
