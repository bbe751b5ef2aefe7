use pandemap_shared::{CaseSource, FeatureIdScheme, Topology, parse_topology};

const SNAPSHOT_URL: &str = "/data/snapshot.json";

/// Fetch the case-data snapshot the maps resolve against. Fetched once on
/// app mount; a failure leaves the app in its loading state.
pub async fn fetch_snapshot() -> Result<CaseSource, String> {
    let resp = gloo_net::http::Request::get(SNAPSHOT_URL)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.json::<CaseSource>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

/// Fetch and parse one map's topology document. Fetched once per map tab
/// mount; the parsed features are cached in a signal by the caller.
pub async fn fetch_topology(url: &str, scheme: FeatureIdScheme) -> Result<Topology, String> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let raw = resp
        .text()
        .await
        .map_err(|e| format!("read error: {e}"))?;
    parse_topology(&raw, scheme)
}
