use super::{PlaylistKind, TransformContext, TransformRule, rewrite_uri_line};
use crate::{
    Result,
    hls::{Line, Tag},
    route::Role,
    stream::classifier::path_ends_with,
};

/// Rule for rewriting segment URLs in media playlists.
pub struct SegmentUrlProxyRule;

impl TransformRule for SegmentUrlProxyRule {
    fn matches(&self, line: &Line, kind: PlaylistKind) -> bool {
        kind == PlaylistKind::Media && line.tag == Tag::Uri
    }

    fn transform(&self, line: &Line, context: &TransformContext) -> Result<String> {
        rewrite_uri_line(line, context, |resolved| {
            if path_ends_with(resolved, ".vtt") {
                Role::Subtitle
            } else {
                Role::Segment
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::rules::test_support::{context, line};

    #[test]
    fn test_rewrites_segment() {
        let result = SegmentUrlProxyRule
            .transform(&line("seg-001.ts"), &context())
            .unwrap();
        assert_eq!(
            result,
            "/proxy/segment?url=https%3A%2F%2Fcdn.example.com%2Fhls%2Fseg-001.ts"
        );
    }

    #[test]
    fn test_path_absolute_segment_keeps_port() {
        let ctx = crate::stream::TransformContext::new(
            "http://h:8080/a/b.m3u8",
            std::sync::Arc::default(),
            None,
        )
        .unwrap();
        let result = SegmentUrlProxyRule.transform(&line("/x/y.ts"), &ctx).unwrap();
        assert_eq!(result, "/proxy/segment?url=http%3A%2F%2Fh%3A8080%2Fx%2Fy.ts");
    }

    #[test]
    fn test_vtt_segment_goes_to_subtitle() {
        let result = SegmentUrlProxyRule
            .transform(&line("subs/en-1.VTT?sig=1"), &context())
            .unwrap();
        assert!(result.starts_with("/proxy/subtitle?url="));
    }

    #[test]
    fn test_does_not_match_master() {
        assert!(!SegmentUrlProxyRule.matches(&line("low.m3u8"), PlaylistKind::Master));
    }
}
