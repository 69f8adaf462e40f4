use std::ops::Range;

/// A single `NAME=VALUE` attribute of a tag line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    /// Quote character around the value, if any.
    pub quote: Option<char>,
    /// Byte range of the value in the source line, quotes excluded.
    pub span: Range<usize>,
}

impl Attribute {
    /// Replace this attribute's value in `line`, keeping every other byte.
    pub fn replace_in(&self, line: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(line.len() + replacement.len());
        out.push_str(&line[..self.span.start]);
        out.push_str(replacement);
        out.push_str(&line[self.span.end..]);
        out
    }
}

/// Attribute list of a tag, in source order. Names are unique; the first
/// occurrence of a repeated name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    attrs: Vec<Attribute>,
}

impl AttributeList {
    /// Parse the attribute list that starts at byte `offset` of `line`.
    ///
    /// Values are either quoted (`"..."` or `'...'`) or run until the next
    /// comma or whitespace.
    pub fn parse(line: &str, offset: usize) -> Self {
        let bytes = line.as_bytes();
        let len = bytes.len();
        let mut attrs: Vec<Attribute> = Vec::new();
        let mut i = offset.min(len);

        while i < len {
            while i < len && (bytes[i] == b',' || bytes[i].is_ascii_whitespace()) {
                i += 1;
            }
            if i >= len {
                break;
            }

            let name_start = i;
            while i < len && bytes[i] != b'=' && bytes[i] != b',' {
                i += 1;
            }
            if i >= len || bytes[i] == b',' {
                // Bare token without a value.
                continue;
            }
            let name = line[name_start..i].trim().to_string();
            i += 1;

            let (value_span, quote) = if i < len && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let q = bytes[i];
                i += 1;
                let start = i;
                while i < len && bytes[i] != q {
                    i += 1;
                }
                let end = i;
                if i < len {
                    i += 1;
                }
                (start..end, Some(q as char))
            } else {
                let start = i;
                while i < len && bytes[i] != b',' && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                (start..i, None)
            };

            // Anything trailing the value up to the next separator is ignored.
            while i < len && bytes[i] != b',' {
                i += 1;
            }

            if name.is_empty() || attrs.iter().any(|a| a.name == name) {
                continue;
            }
            attrs.push(Attribute {
                name,
                value: line[value_span.clone()].to_string(),
                quote,
                span: value_span,
            });
        }

        Self { attrs }
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|a| a.value.as_str())
    }
}
