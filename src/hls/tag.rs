use super::attributes::{Attribute, AttributeList};

/// Typed view of one M3U8 line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// `#EXT-X-STREAM-INF:` variant stream info.
    StreamInf(AttributeList),
    /// `#EXT-X-I-FRAME-STREAM-INF:` I-frame playlist reference.
    IFrameStreamInf(AttributeList),
    /// `#EXT-X-MEDIA:` rendition (audio, subtitles, ...).
    Media(AttributeList),
    /// `#EXT-X-KEY:` encryption key.
    Key(AttributeList),
    /// `#EXT-X-MAP:` init segment.
    Map(AttributeList),
    /// Any other `#` line, including `#EXTM3U` and unknown tags.
    Comment,
    Blank,
    /// A URI line (sub-playlist or segment reference).
    Uri,
}

const STREAM_INF: &str = "#EXT-X-STREAM-INF:";
const I_FRAME_STREAM_INF: &str = "#EXT-X-I-FRAME-STREAM-INF:";
const MEDIA: &str = "#EXT-X-MEDIA:";
const KEY: &str = "#EXT-X-KEY:";
const MAP: &str = "#EXT-X-MAP:";

impl Tag {
    /// Tokenize a single line (without its line terminator).
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim_start();
        let lead = line.len() - trimmed.len();

        if trimmed.trim_end().is_empty() {
            return Self::Blank;
        }
        if !trimmed.starts_with('#') {
            return Self::Uri;
        }

        let attrs = |prefix: &str| AttributeList::parse(line, lead + prefix.len());

        if trimmed.starts_with(STREAM_INF) {
            Self::StreamInf(attrs(STREAM_INF))
        } else if trimmed.starts_with(I_FRAME_STREAM_INF) {
            Self::IFrameStreamInf(attrs(I_FRAME_STREAM_INF))
        } else if trimmed.starts_with(MEDIA) {
            Self::Media(attrs(MEDIA))
        } else if trimmed.starts_with(KEY) {
            Self::Key(attrs(KEY))
        } else if trimmed.starts_with(MAP) {
            Self::Map(attrs(MAP))
        } else {
            Self::Comment
        }
    }

    pub fn attributes(&self) -> Option<&AttributeList> {
        match self {
            Self::StreamInf(a)
            | Self::IFrameStreamInf(a)
            | Self::Media(a)
            | Self::Key(a)
            | Self::Map(a) => Some(a),
            Self::Comment | Self::Blank | Self::Uri => None,
        }
    }

    /// The `URI` attribute, when this tag has one.
    pub fn uri(&self) -> Option<&Attribute> {
        self.attributes().and_then(|a| a.get("URI"))
    }

    /// Tags that only appear in master playlists.
    pub fn is_master_tag(&self) -> bool {
        matches!(
            self,
            Self::StreamInf(_) | Self::IFrameStreamInf(_) | Self::Media(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_and_uri() {
        assert_eq!(Tag::parse(""), Tag::Blank);
        assert_eq!(Tag::parse("   "), Tag::Blank);
        assert_eq!(Tag::parse("segment001.ts"), Tag::Uri);
        assert_eq!(Tag::parse("https://example.com/low.m3u8"), Tag::Uri);
    }

    #[test]
    fn test_parse_comments() {
        assert_eq!(Tag::parse("#EXTM3U"), Tag::Comment);
        assert_eq!(Tag::parse("#EXTINF:6.0,"), Tag::Comment);
        assert_eq!(Tag::parse("# just a comment"), Tag::Comment);
        assert_eq!(Tag::parse("#EXT-X-MEDIA-SEQUENCE:42"), Tag::Comment);
    }

    #[test]
    fn test_parse_stream_inf() {
        let tag = Tag::parse("#EXT-X-STREAM-INF:BANDWIDTH=100");
        assert!(matches!(tag, Tag::StreamInf(_)));
        assert_eq!(tag.attributes().unwrap().value("BANDWIDTH"), Some("100"));
        assert!(tag.is_master_tag());
    }

    #[test]
    fn test_parse_media_with_uri() {
        let line =
            r#"#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID="aud",NAME="English",URI="audio/en.m3u8""#;
        let tag = Tag::parse(line);
        assert!(matches!(tag, Tag::Media(_)));
        assert_eq!(tag.attributes().unwrap().value("TYPE"), Some("AUDIO"));
        assert_eq!(tag.uri().unwrap().value, "audio/en.m3u8");
    }

    #[test]
    fn test_parse_key_and_map() {
        let key = Tag::parse(r#"#EXT-X-KEY:METHOD=AES-128,URI="key.bin""#);
        assert!(matches!(key, Tag::Key(_)));
        assert!(!key.is_master_tag());

        let map = Tag::parse(r#"#EXT-X-MAP:URI="init.mp4",BYTERANGE="617@0""#);
        assert!(matches!(map, Tag::Map(_)));
        assert_eq!(map.uri().unwrap().value, "init.mp4");
    }

    #[test]
    fn test_leading_whitespace_keeps_spans_on_raw_line() {
        let line = r#"  #EXT-X-KEY:METHOD=AES-128,URI="key.bin""#;
        let tag = Tag::parse(line);
        let uri = tag.uri().unwrap();
        assert_eq!(&line[uri.span.clone()], "key.bin");
    }
}
