use super::{PlaylistKind, TransformContext, TransformRule, rewrite_uri_attribute, rewrite_uri_line};
use crate::{
    Result,
    hls::{Line, Tag},
    route::Role,
};

/// Rule for rewriting variant playlist references to go through the
/// playlist route.
pub struct VariantUrlProxyRule;

impl TransformRule for VariantUrlProxyRule {
    fn matches(&self, line: &Line, kind: PlaylistKind) -> bool {
        kind == PlaylistKind::Master && matches!(line.tag, Tag::Uri | Tag::IFrameStreamInf(_))
    }

    fn transform(&self, line: &Line, context: &TransformContext) -> Result<String> {
        match line.tag {
            Tag::IFrameStreamInf(_) => rewrite_uri_attribute(line, context, |_| Some(Role::Playlist)),
            _ => rewrite_uri_line(line, context, |_| Role::Playlist),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::rules::test_support::{context, line};

    #[test]
    fn test_matches_variant_uri() {
        let rule = VariantUrlProxyRule;
        assert!(rule.matches(&line("low/index.m3u8"), PlaylistKind::Master));
        assert!(!rule.matches(&line("seg1.ts"), PlaylistKind::Media));
        assert!(!rule.matches(&line("#EXT-X-STREAM-INF:BANDWIDTH=1"), PlaylistKind::Master));
    }

    #[test]
    fn test_rewrites_relative_variant() {
        let result = VariantUrlProxyRule
            .transform(&line("low/index.m3u8"), &context())
            .unwrap();
        assert_eq!(
            result,
            "/proxy/playlist?url=https%3A%2F%2Fcdn.example.com%2Fhls%2Flow%2Findex.m3u8"
        );
    }

    #[test]
    fn test_rewrites_i_frame_uri_attribute() {
        let raw = r#"#EXT-X-I-FRAME-STREAM-INF:BANDWIDTH=86000,URI="iframe.m3u8""#;
        let result = VariantUrlProxyRule.transform(&line(raw), &context()).unwrap();
        assert_eq!(
            result,
            "#EXT-X-I-FRAME-STREAM-INF:BANDWIDTH=86000,URI=\"/proxy/playlist?url=https%3A%2F%2Fcdn.example.com%2Fhls%2Fiframe.m3u8\""
        );
    }

    #[test]
    fn test_proxied_variant_is_untouched() {
        let raw = "/proxy/playlist?url=https%3A%2F%2Fcdn.example.com%2Flow.m3u8";
        let result = VariantUrlProxyRule.transform(&line(raw), &context()).unwrap();
        assert_eq!(result, raw);
    }
}
