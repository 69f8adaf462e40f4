use super::{PlaylistKind, TransformContext, TransformRule, rewrite_uri_attribute};
use crate::{
    Result,
    hls::{Line, Tag},
    route::Role,
};

/// Rule for rewriting #EXT-X-KEY URIs to the key route.
///
/// Keys served from a provider's well-known key path are hidden behind the
/// parameter-less provider key route instead.
pub struct KeyTagRewriteRule;

impl TransformRule for KeyTagRewriteRule {
    fn matches(&self, line: &Line, kind: PlaylistKind) -> bool {
        kind == PlaylistKind::Media && matches!(line.tag, Tag::Key(_))
    }

    fn transform(&self, line: &Line, context: &TransformContext) -> Result<String> {
        rewrite_uri_attribute(line, context, |resolved| {
            if context.is_provider_key(resolved) {
                None
            } else {
                Some(Role::Key)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ProxyConfig,
        proxy::ProviderTable,
        stream::rules::test_support::{BASE, context, line},
    };
    use std::sync::Arc;

    fn provider_context() -> TransformContext {
        let config = ProxyConfig {
            providers: ProviderTable::from_json(
                r#"[{"host": "stream.example.com", "key_path": "/storage/enc.key"}]"#,
            )
            .unwrap(),
            ..Default::default()
        };
        TransformContext::new(BASE, Arc::new(config), None).unwrap()
    }

    #[test]
    fn test_matches_only_in_media_playlists() {
        let key = line(r#"#EXT-X-KEY:METHOD=AES-128,URI="key.bin""#);
        assert!(KeyTagRewriteRule.matches(&key, PlaylistKind::Media));
        assert!(!KeyTagRewriteRule.matches(&key, PlaylistKind::Master));
    }

    #[test]
    fn test_rewrites_key_preserving_method() {
        let raw = r#"#EXT-X-KEY:METHOD=AES-128,URI="https://k/key.bin",IV=0x1"#;
        let result = KeyTagRewriteRule.transform(&line(raw), &context()).unwrap();
        assert_eq!(
            result,
            "#EXT-X-KEY:METHOD=AES-128,URI=\"/proxy/key?url=https%3A%2F%2Fk%2Fkey.bin\",IV=0x1"
        );
    }

    #[test]
    fn test_provider_key_ignores_query() {
        let raw = r#"#EXT-X-KEY:METHOD=AES-128,URI="https://stream.example.com/storage/enc.key?token=abc""#;
        let result = KeyTagRewriteRule
            .transform(&line(raw), &provider_context())
            .unwrap();
        assert_eq!(
            result,
            "#EXT-X-KEY:METHOD=AES-128,URI=\"/proxy/provider-key\""
        );
    }

    #[test]
    fn test_other_provider_path_uses_key_route() {
        let raw = r#"#EXT-X-KEY:METHOD=AES-128,URI="https://stream.example.com/keys/other.key""#;
        let result = KeyTagRewriteRule
            .transform(&line(raw), &provider_context())
            .unwrap();
        assert!(result.contains("URI=\"/proxy/key?url=https%3A%2F%2Fstream.example.com"));
    }

    #[test]
    fn test_method_none_is_untouched() {
        let raw = "#EXT-X-KEY:METHOD=NONE";
        let result = KeyTagRewriteRule.transform(&line(raw), &context()).unwrap();
        assert_eq!(result, raw);
    }
}
