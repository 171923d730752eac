//! Consent screen in the system browser.

use automower_api::{BoxError, WebAuthenticator, async_trait};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::warn;
use url::Url;

/// Opens the consent screen in the default browser and reads the final
/// redirect URL pasted by the user on stdin.
#[derive(Debug, Default)]
pub struct BrowserAuthenticator;

#[async_trait]
impl WebAuthenticator for BrowserAuthenticator {
    async fn authenticate(
        &self,
        authorization_url: &Url,
        callback_scheme: &str,
    ) -> Result<Url, BoxError> {
        if let Err(e) = opener::open(authorization_url.as_str()) {
            warn!("Failed to open browser: {e}");
        }

        println!("Authorize the application at:\n\n  {authorization_url}\n");
        println!("Then paste the URL you were redirected to ({callback_scheme}://...):");

        read_callback(BufReader::new(tokio::io::stdin()), callback_scheme).await
    }
}

/// Reads one line and parses it as the callback URL.
async fn read_callback<R>(mut reader: R, callback_scheme: &str) -> Result<Url, BoxError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    reader.read_line(&mut line).await?;
    parse_callback(line.trim(), callback_scheme)
}

fn parse_callback(input: &str, callback_scheme: &str) -> Result<Url, BoxError> {
    if input.is_empty() {
        return Err("authorization cancelled".into());
    }

    let callback = Url::parse(input)?;
    if callback.scheme() != callback_scheme {
        return Err(format!(
            "expected a {callback_scheme}:// URL, got {}://",
            callback.scheme()
        )
        .into());
    }
    Ok(callback)
}
