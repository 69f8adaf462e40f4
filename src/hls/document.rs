use super::{M3U8_HEADER, tag::Tag};

/// One line of a playlist: the raw text and its tokenized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub raw: &'a str,
    pub tag: Tag,
}

/// A tokenized playlist, borrowed from the fetched body.
#[derive(Debug, Clone)]
pub struct ManifestDocument<'a> {
    lines: Vec<Line<'a>>,
}

impl<'a> ManifestDocument<'a> {
    /// Split `body` on `\n` and tokenize each line. A trailing `\r` is not
    /// part of the line.
    pub fn parse(body: &'a str) -> Self {
        let lines = body
            .split('\n')
            .map(|raw| {
                let raw = raw.strip_suffix('\r').unwrap_or(raw);
                Line {
                    raw,
                    tag: Tag::parse(raw),
                }
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[Line<'a>] {
        &self.lines
    }

    /// Whether the document declares master-playlist content.
    pub fn is_master(&self) -> bool {
        self.lines.iter().any(|line| line.tag.is_master_tag())
    }
}

/// Whether `body` starts with the M3U8 header once leading whitespace is
/// ignored.
pub fn has_m3u8_header(body: &str) -> bool {
    body.trim_start_matches('\u{feff}')
        .trim_start()
        .starts_with(M3U8_HEADER)
}
