//! Path and query-string utilities.

use percent_encoding::percent_decode_str;

/// Joins path segments with exactly one `/` between each.
///
/// Leading and trailing slashes are stripped from every segment first, and
/// empty segments are skipped so they never introduce double slashes. The
/// result carries no leading or trailing slash, which makes the function
/// idempotent under re-joining its own output.
///
/// ```
/// use http_request::combine_path_components;
///
/// assert_eq!(combine_path_components(["/foo/", "/bar/"]), "foo/bar");
/// ```
pub fn combine_path_components<I, S>(components: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    components
        .into_iter()
        .filter_map(|component| {
            let trimmed = component.as_ref().trim_matches('/');
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Parses a raw query string into an ordered list of key/value pairs.
///
/// Pairs are split on `&`, then on the first `=`. A pair with no `=` is kept
/// as a key with an empty value; empty pairs (`a&&b`) are dropped. Keys and
/// values are percent-decoded, with `+` treated as a space.
pub fn parse_query_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode_component(key), decode_component(value)),
            None => (decode_component(pair), String::new()),
        })
        .collect()
}

fn decode_component(component: &str) -> String {
    percent_decode_str(&component.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}
