pub mod attributes;
pub mod document;
pub mod tag;

pub use attributes::{Attribute, AttributeList};
pub use document::{Line, ManifestDocument};
pub use tag::Tag;

/// Header token every M3U8 playlist starts with.
pub const M3U8_HEADER: &str = "#EXTM3U";
