use super::{PlaylistKind, TransformContext, TransformRule, rewrite_uri_attribute};
use crate::{
    Result,
    hls::{Line, Tag},
    route::Role,
};

/// Rule for rewriting #EXT-X-MAP init segments to the segment route.
pub struct MapTagRewriteRule;

impl TransformRule for MapTagRewriteRule {
    fn matches(&self, line: &Line, kind: PlaylistKind) -> bool {
        kind == PlaylistKind::Media && matches!(line.tag, Tag::Map(_))
    }

    fn transform(&self, line: &Line, context: &TransformContext) -> Result<String> {
        rewrite_uri_attribute(line, context, |_| Some(Role::Segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::rules::test_support::{context, line};

    #[test]
    fn test_rewrites_map_keeping_byterange() {
        let raw = r#"#EXT-X-MAP:URI="init.mp4",BYTERANGE="617@0""#;
        let result = MapTagRewriteRule.transform(&line(raw), &context()).unwrap();
        assert_eq!(
            result,
            "#EXT-X-MAP:URI=\"/proxy/segment?url=https%3A%2F%2Fcdn.example.com%2Fhls%2Finit.mp4\",BYTERANGE=\"617@0\""
        );
    }
}
