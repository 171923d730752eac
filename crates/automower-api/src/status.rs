//! HTTP status classification shared by every API call.

use crate::error::{Error, Result};
use reqwest::Response;

/// Maps a status code to success or an error kind.
///
/// 200 and 201 succeed; 400 and 401 map to their own kinds; every other code,
/// including other 2xx codes, is `InvalidStatusCode`.
///
/// # Errors
///
/// Returns the error kind for any status other than 200 and 201.
pub fn classify(status: u16) -> Result<()> {
    match status {
        200 | 201 => Ok(()),
        400 => Err(Error::BadRequest),
        401 => Err(Error::Unauthorized),
        code => Err(Error::InvalidStatusCode(code)),
    }
}

/// Classifies the response status and returns the body text on success.
///
/// # Errors
///
/// Returns the classified status error, or `Error::Http` if the body cannot
/// be read.
pub async fn into_body(response: Response) -> Result<String> {
    let status = response.status().as_u16();
    if let Err(e) = classify(status) {
        tracing::debug!(status, url = %response.url(), "Request failed");
        return Err(e);
    }
    Ok(response.text().await?)
}
