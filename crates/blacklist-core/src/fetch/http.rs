//! Blocking HTTP GET using the curl crate (libcurl).

use super::FetchOptions;
use crate::error::{BlacklistError, FetchFailure, Result};
use url::Url;

/// GET `url` and return the response body. Follows redirects.
///
/// Any transport failure or non-2xx status is a `Fetch` error; nothing is retried.
pub fn fetch_remote(url: &Url, opts: &FetchOptions) -> Result<Vec<u8>> {
    let fail = |reason: FetchFailure| BlacklistError::Fetch {
        url: url.to_string(),
        reason,
    };
    let setup = |e: curl::Error| fail(FetchFailure::Transport(e));

    tracing::info!("fetching {}", url);
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str()).map_err(setup)?;
    easy.get(true).map_err(setup)?;
    easy.follow_location(true).map_err(setup)?;
    easy.max_redirections(10).map_err(setup)?;
    easy.connect_timeout(opts.connect_timeout).map_err(setup)?;
    easy.timeout(opts.timeout).map_err(setup)?;
    easy.useragent(&opts.user_agent).map_err(setup)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(setup)?;
        transfer.perform().map_err(|e| fail(classify_curl_error(e)))?;
    }

    let code = easy.response_code().map_err(setup)?;
    tracing::debug!("GET {} returned HTTP {}", url, code);
    if !(200..300).contains(&code) {
        return Err(fail(FetchFailure::Status(code)));
    }
    Ok(body)
}

/// Classify a curl error from `perform`.
fn classify_curl_error(e: curl::Error) -> FetchFailure {
    if e.is_operation_timedout() {
        return FetchFailure::Timeout;
    }
    if e.is_couldnt_connect() || e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
        return FetchFailure::Unreachable(e);
    }
    FetchFailure::Transport(e)
}
