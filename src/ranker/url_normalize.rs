//! URL canonicalisation for cross-source story deduplication.
//!
//! News URLs for the same article arrive in many spellings: mobile
//! (`m.`) and AMP (`amp.`, `/amp`) variants, campaign-tagged links from
//! feeds and aggregators, reordered query strings, fragments. All of
//! those must collapse to one key or the dedup pass keeps duplicates.

use url::Url;

/// Query parameters that identify a campaign or click, not a page.
/// `utm_*` and the ad-click ids are universal; `cmpid`/`icid`/`ncid`/
/// `ocid` are the campaign tags the news outlets put on their own feed
/// links.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "ref",
    "si",
    "feature",
    "cmpid",
    "icid",
    "ncid",
    "ocid",
];

/// Host prefixes that name a delivery channel rather than a site.
const CHANNEL_PREFIXES: &[&str] = &["www.", "m.", "mobile.", "amp."];

/// Canonicalise a URL for deduplication comparison.
///
/// Beyond the generic cleanups (lowercase scheme/host, default ports,
/// fragments, trailing slash, sorted query), this folds the ways news
/// sites serve one article under several addresses: `www.`/`m.`/`amp.`
/// host prefixes are dropped, a trailing `/amp` path segment is dropped,
/// and campaign parameters are stripped.
///
/// Unparseable input is returned unchanged so it still works as a map
/// key.
///
/// # Examples
///
/// ```
/// use mash_research::ranker::url_normalize::normalize_url;
///
/// let canonical = normalize_url("https://www.example.com/story/amp?cmpid=feed&a=1#top");
/// assert_eq!(canonical, normalize_url("https://m.example.com/story?a=1"));
/// ```
pub fn normalize_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_string();
    };

    parsed.set_fragment(None);

    if is_default_port(&parsed) {
        let _ = parsed.set_port(None);
    }

    if let Some(host) = parsed.host_str() {
        let canonical = canonical_host(host);
        if canonical != host {
            // set_host only fails on invalid input; the original host
            // stands in that case.
            let _ = parsed.set_host(Some(&canonical));
        }
    }

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.to_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    params.sort();
    if params.is_empty() {
        parsed.set_query(None);
    } else {
        let qs: String = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        parsed.set_query(Some(&qs));
    }

    let path = parsed.path().to_string();
    let trimmed = path.strip_suffix('/').unwrap_or(&path);
    let trimmed = trimmed.strip_suffix("/amp").unwrap_or(trimmed);
    if trimmed.is_empty() {
        parsed.set_path("/");
    } else if trimmed != path {
        parsed.set_path(trimmed);
    }

    parsed.to_string()
}

/// Strip channel prefixes off a host, keeping at least a two-label
/// domain so `m.co` style hosts survive intact.
fn canonical_host(host: &str) -> String {
    let mut current = host;
    loop {
        let stripped = CHANNEL_PREFIXES
            .iter()
            .find_map(|p| current.strip_prefix(p))
            .filter(|rest| rest.contains('.'));
        match stripped {
            Some(rest) => current = rest,
            None => return current.to_string(),
        }
    }
}

fn is_default_port(url: &Url) -> bool {
    matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    )
}
