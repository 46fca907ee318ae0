//! Source list reduction.

use std::collections::HashSet;

use crate::source::Source;

/// Reduce a list of sources to a minimal equivalent set.
pub fn reduce_source_list(sources: &[Source]) -> Vec<Source> {
    let mut seen = HashSet::new();
    let mut sources: Vec<Source> = sources
        .iter()
        .filter(|s| seen.insert(*s))
        .cloned()
        .collect();

    // 'none' overrides any other sources.
    if sources.contains(&Source::None) {
        return vec![Source::None];
    }

    // The wildcard covers all network scheme sources.
    // e.g. '* https: data: example.com' -> '* data:'
    if sources.contains(&Source::Any) {
        let kept = sources.into_iter().filter(|s| match s {
            Source::Any => false,
            Source::SelfOrigin | Source::None => true,
            Source::Expression(_) => {
                s.is_quoted() || (s.scheme().is_some() && !s.has_network_scheme())
            }
        });
        sources = std::iter::once(Source::Any).chain(kept).collect();
    }

    // Remove protocol-prefixed hosts if the protocol is allowed.
    // e.g. 'http: data: example.com https://example.com' -> 'http: data: example.com'
    let mut schemes: Vec<&'static str> = Vec::new();
    for source in &sources {
        match source.bare_network_scheme() {
            Some("http") => schemes.extend(["http", "https"]),
            Some(_) => schemes.push("https"),
            None => {}
        }
    }
    if schemes.is_empty() {
        return sources;
    }

    sources
        .into_iter()
        .filter(|s| match s.as_expression() {
            Some(expr) => !schemes.iter().any(|scheme| {
                expr.strip_prefix(scheme)
                    .map_or(false, |rest| rest.starts_with("://"))
            }),
            None => true,
        })
        .collect()
}
