//! Request URL composition for the MOP information protocol.

use url::Url;

use crate::error::{MeosError, Result};

/// Append `params` to `base` as form-encoded query pairs, keeping any query
/// the base already carries.
pub fn build_url<K, V>(base: &str, params: &[(K, V)]) -> Result<Url>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = Url::parse(base).map_err(|e| MeosError::invalid_endpoint(base, e))?;
    if url.cannot_be_a_base() {
        return Err(MeosError::invalid_endpoint(base, "URL cannot carry a query"));
    }
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key.as_ref(), value.as_ref());
        }
    }
    Ok(url)
}

/// `lookup=competitor&card=<card_number>`
pub fn lookup_competitor_params(card_number: &str) -> [(&'static str, &str); 2] {
    [("lookup", "competitor"), ("card", card_number)]
}

/// `get=competition`
pub fn competition_params() -> [(&'static str, &'static str); 1] {
    [("get", "competition")]
}
