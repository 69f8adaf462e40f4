use super::{PlaylistKind, TransformContext, TransformRule, rewrite_uri_attribute};
use crate::{
    Result,
    hls::{Line, Tag},
    route::Role,
};

/// Rule for rewriting #EXT-X-MEDIA tags with URI attributes.
pub struct MediaTagProxyRule;

impl MediaTagProxyRule {
    fn role_for(line: &Line) -> Role {
        let media_type = line
            .tag
            .attributes()
            .and_then(|attrs| attrs.value("TYPE"))
            .unwrap_or_default();

        if media_type.eq_ignore_ascii_case("AUDIO") {
            Role::Audio
        } else if media_type.eq_ignore_ascii_case("SUBTITLES") {
            Role::Subtitle
        } else {
            Role::Playlist
        }
    }
}

impl TransformRule for MediaTagProxyRule {
    fn matches(&self, line: &Line, kind: PlaylistKind) -> bool {
        kind == PlaylistKind::Master && matches!(line.tag, Tag::Media(_))
    }

    fn transform(&self, line: &Line, context: &TransformContext) -> Result<String> {
        let role = Self::role_for(line);
        rewrite_uri_attribute(line, context, |_| Some(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::rules::test_support::{context, line};

    #[test]
    fn test_audio_rendition() {
        let raw = r#"#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID="aac",NAME="English",URI="audio/en.m3u8""#;
        let result = MediaTagProxyRule.transform(&line(raw), &context()).unwrap();
        assert_eq!(
            result,
            "#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"aac\",NAME=\"English\",URI=\"/proxy/audio?url=https%3A%2F%2Fcdn.example.com%2Fhls%2Faudio%2Fen.m3u8\""
        );
    }

    #[test]
    fn test_subtitle_rendition() {
        let raw = r#"#EXT-X-MEDIA:TYPE=SUBTITLES,GROUP-ID="subs",URI="https://subs.example.com/en.m3u8",LANGUAGE="en""#;
        let result = MediaTagProxyRule.transform(&line(raw), &context()).unwrap();
        assert_eq!(
            result,
            "#EXT-X-MEDIA:TYPE=SUBTITLES,GROUP-ID=\"subs\",URI=\"/proxy/subtitle?url=https%3A%2F%2Fsubs.example.com%2Fen.m3u8\",LANGUAGE=\"en\""
        );
    }

    #[test]
    fn test_other_rendition_goes_to_playlist() {
        let raw = r#"#EXT-X-MEDIA:TYPE=VIDEO,GROUP-ID="v",URI="alt.m3u8""#;
        let result = MediaTagProxyRule.transform(&line(raw), &context()).unwrap();
        assert!(result.contains("URI=\"/proxy/playlist?url="));
    }

    #[test]
    fn test_unquoted_uri_keeps_style() {
        let raw = "#EXT-X-MEDIA:TYPE=AUDIO,URI=a.m3u8,DEFAULT=YES";
        let result = MediaTagProxyRule.transform(&line(raw), &context()).unwrap();
        assert_eq!(
            result,
            "#EXT-X-MEDIA:TYPE=AUDIO,URI=/proxy/audio?url=https%3A%2F%2Fcdn.example.com%2Fhls%2Fa.m3u8,DEFAULT=YES"
        );
    }

    #[test]
    fn test_rendition_without_uri_is_untouched() {
        let raw = r#"#EXT-X-MEDIA:TYPE=CLOSED-CAPTIONS,GROUP-ID="cc",INSTREAM-ID="CC1""#;
        let result = MediaTagProxyRule.transform(&line(raw), &context()).unwrap();
        assert_eq!(result, raw);
    }
}
