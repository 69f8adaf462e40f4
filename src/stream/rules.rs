pub mod key_rewrite;
pub mod map_rewrite;
pub mod media_proxy;
pub mod segment_proxy;
pub mod variant_proxy;

use super::{classifier::PlaylistKind, context::TransformContext};
use crate::{Result, hls::Line, route::Role};

pub use key_rewrite::KeyTagRewriteRule;
pub use map_rewrite::MapTagRewriteRule;
pub use media_proxy::MediaTagProxyRule;
pub use segment_proxy::SegmentUrlProxyRule;
pub use variant_proxy::VariantUrlProxyRule;

/// Trait for transform rules.
pub trait TransformRule: Send + Sync {
    /// Check if this rule should be applied.
    fn matches(&self, line: &Line, kind: PlaylistKind) -> bool;

    /// Transform the line.
    fn transform(&self, line: &Line, context: &TransformContext) -> Result<String>;
}

/// Create default set of transform rules.
pub fn default_rules() -> Vec<Box<dyn TransformRule>> {
    vec![
        Box::new(VariantUrlProxyRule),
        Box::new(MediaTagProxyRule),
        Box::new(KeyTagRewriteRule),
        Box::new(MapTagRewriteRule),
        Box::new(SegmentUrlProxyRule),
    ]
}

/// Rewrite the `URI` attribute of a tag line. `pick` chooses the route for
/// the resolved target; `None` means the provider key route.
///
/// Lines without a `URI`, or whose `URI` already points at this proxy, are
/// returned as they are.
pub(crate) fn rewrite_uri_attribute(
    line: &Line,
    context: &TransformContext,
    pick: impl FnOnce(&str) -> Option<Role>,
) -> Result<String> {
    let Some(uri) = line.tag.uri() else {
        return Ok(line.raw.to_string());
    };
    if uri.value.is_empty() || context.is_proxied(&uri.value) {
        return Ok(line.raw.to_string());
    }

    let resolved = context.resolve_url(&uri.value)?;
    let route = match pick(&resolved) {
        Some(role) => context.build_route(role, &resolved),
        None => context.provider_key_route(),
    };
    Ok(uri.replace_in(line.raw, &route))
}

/// Rewrite a bare URI line to the route chosen by `pick`.
pub(crate) fn rewrite_uri_line(
    line: &Line,
    context: &TransformContext,
    pick: impl FnOnce(&str) -> Role,
) -> Result<String> {
    let uri = line.raw.trim();
    if context.is_proxied(uri) {
        return Ok(line.raw.to_string());
    }

    let resolved = context.resolve_url(uri)?;
    Ok(context.build_route(pick(&resolved), &resolved))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::{ProxyConfig, hls::Tag};
    use std::sync::Arc;

    pub const BASE: &str = "https://cdn.example.com/hls/index.m3u8";

    pub fn context() -> TransformContext {
        TransformContext::new(BASE, Arc::new(ProxyConfig::default()), None).unwrap()
    }

    pub fn line(raw: &str) -> Line<'_> {
        Line {
            raw,
            tag: Tag::parse(raw),
        }
    }
}
