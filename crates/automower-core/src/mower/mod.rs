//! Mower status as returned by the listing endpoint.

mod dto;
mod model;

pub use model::{Mower, MowerActivity, MowerMode, MowerState, Position};

use automower_api::Error;

/// Decodes a mower listing body.
///
/// Records keep their response order. Unknown enum values fail decoding.
///
/// # Errors
///
/// Returns `Error::CannotDecode` with the raw body if it does not match the
/// listing schema.
pub fn decode_mowers(body: &str) -> automower_api::Result<Vec<Mower>> {
    let list: dto::MowerList =
        serde_json::from_str(body).map_err(|e| Error::cannot_decode(body, e))?;
    Ok(list.data.into_iter().map(dto::MowerData::into_mower).collect())
}
