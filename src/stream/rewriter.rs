use super::{
    classifier::{ManifestKind, PlaylistKind},
    context::TransformContext,
    rules::{TransformRule, default_rules},
};
use crate::{
    Error, Result,
    hls::{Line, ManifestDocument, document::has_m3u8_header},
};

/// Line-oriented M3U8 rewriter.
pub struct ManifestRewriter {
    context: TransformContext,
    rules: Vec<Box<dyn TransformRule>>,
}

impl ManifestRewriter {
    pub fn new(context: TransformContext, rules: Vec<Box<dyn TransformRule>>) -> Self {
        Self { context, rules }
    }

    /// Rewriter with the default rule set.
    pub fn with_default_rules(context: TransformContext) -> Self {
        Self::new(context, default_rules())
    }

    /// Rewrite every proxied reference in `body`. Lines no rule claims are
    /// kept verbatim, in order.
    pub fn rewrite(&self, kind: ManifestKind, body: &str) -> Result<String> {
        let playlist_kind = match kind.playlist_kind() {
            Some(k) if has_m3u8_header(body) => k,
            _ => return Err(Error::NotAnM3u8(self.context.base_url.to_string())),
        };

        let document = ManifestDocument::parse(body);
        let mut output = Vec::with_capacity(document.lines().len());
        for line in document.lines() {
            output.push(self.rewrite_line(line, playlist_kind)?);
        }

        Ok(output.join("\n"))
    }

    fn rewrite_line(&self, line: &Line, kind: PlaylistKind) -> Result<String> {
        for rule in &self.rules {
            if rule.matches(line, kind) {
                return rule.transform(line, &self.context);
            }
        }
        Ok(line.raw.to_string())
    }
}
