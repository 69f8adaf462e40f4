use crate::hls::{ManifestDocument, document::has_m3u8_header};

/// Leading token of a WebVTT subtitle file.
pub const WEBVTT_HEADER: &str = "WEBVTT";

/// What a fetched text resource turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Vtt,
    M3u8Master,
    M3u8Media,
    Opaque,
}

/// Which rewrite grammar applies to a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistKind {
    /// References other playlists.
    Master,
    /// References segments and keys.
    Media,
}

impl ManifestKind {
    pub fn playlist_kind(&self) -> Option<PlaylistKind> {
        match self {
            Self::M3u8Master => Some(PlaylistKind::Master),
            Self::M3u8Media => Some(PlaylistKind::Media),
            Self::Vtt | Self::Opaque => None,
        }
    }
}

/// Content-based classifier for fetched text resources.
pub struct ManifestClassifier;

impl ManifestClassifier {
    /// Classify `body` fetched from `url`.
    ///
    /// Subtitles win over everything else; master vs media is decided from
    /// the tokenized content, never from the URL.
    pub fn classify(url: &str, body: &str) -> ManifestKind {
        let trimmed = body.trim_start_matches('\u{feff}').trim_start();

        if path_ends_with(url, ".vtt") || trimmed.starts_with(WEBVTT_HEADER) {
            return ManifestKind::Vtt;
        }
        if !has_m3u8_header(body) {
            return ManifestKind::Opaque;
        }
        if ManifestDocument::parse(body).is_master() {
            ManifestKind::M3u8Master
        } else {
            ManifestKind::M3u8Media
        }
    }
}

/// Whether the path component of `url` ends with `suffix`, ignoring case.
pub fn path_ends_with(url: &str, suffix: &str) -> bool {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or(url)
            .to_string(),
    };
    path.to_ascii_lowercase()
        .ends_with(&suffix.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://cdn.example.com/hls/index.m3u8";

    #[test]
    fn test_vtt_by_body() {
        assert_eq!(
            ManifestClassifier::classify(BASE, "WEBVTT\n\n00:00.000 --> 00:01.000\nhi"),
            ManifestKind::Vtt
        );
    }

    #[test]
    fn test_vtt_body_wins_over_m3u8_extension() {
        assert_eq!(
            ManifestClassifier::classify(BASE, "  WEBVTT\n"),
            ManifestKind::Vtt
        );
    }

    #[test]
    fn test_vtt_by_path_ignores_query_and_case() {
        assert_eq!(
            ManifestClassifier::classify("https://cdn.example.com/subs/EN.VTT?token=1", ""),
            ManifestKind::Vtt
        );
        assert_eq!(
            ManifestClassifier::classify("https://cdn.example.com/subs/en.m3u8?f=a.vtt", "#EXTM3U"),
            ManifestKind::M3u8Media
        );
    }

    #[test]
    fn test_opaque() {
        assert_eq!(
            ManifestClassifier::classify(BASE, "<html>blocked</html>"),
            ManifestKind::Opaque
        );
        assert_eq!(ManifestClassifier::classify(BASE, ""), ManifestKind::Opaque);
    }

    #[test]
    fn test_master_by_stream_inf() {
        let body = "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=100\nlow.m3u8";
        assert_eq!(
            ManifestClassifier::classify(BASE, body),
            ManifestKind::M3u8Master
        );
    }

    #[test]
    fn test_master_by_media_tag() {
        let body = "#EXTM3U\n#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"a\",URI=\"a.m3u8\"";
        assert_eq!(
            ManifestClassifier::classify(BASE, body),
            ManifestKind::M3u8Master
        );
    }

    #[test]
    fn test_media_sequence_is_not_a_media_tag() {
        let body = "#EXTM3U\n#EXT-X-MEDIA-SEQUENCE:7\n#EXTINF:6.0,\nseg7.ts\n#EXT-X-ENDLIST";
        assert_eq!(
            ManifestClassifier::classify(BASE, body),
            ManifestKind::M3u8Media
        );
    }

    #[test]
    fn test_kind_helpers() {
        assert_eq!(
            ManifestKind::M3u8Master.playlist_kind(),
            Some(PlaylistKind::Master)
        );
        assert_eq!(
            ManifestKind::M3u8Media.playlist_kind(),
            Some(PlaylistKind::Media)
        );
        assert_eq!(ManifestKind::Vtt.playlist_kind(), None);
        assert_eq!(ManifestKind::Opaque.playlist_kind(), None);
    }
}
