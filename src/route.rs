//! Naming of the internal proxy routes that rewritten playlists point at.

use std::fmt;

/// Path of the fixed, parameter-less provider key route.
pub const PROVIDER_KEY_PATH: &str = "/proxy/provider-key";

/// The role a proxied resource plays for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Playlist,
    Segment,
    Key,
    Audio,
    Subtitle,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Playlist,
        Role::Segment,
        Role::Key,
        Role::Audio,
        Role::Subtitle,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Playlist => "/proxy/playlist",
            Self::Segment => "/proxy/segment",
            Self::Key => "/proxy/key",
            Self::Audio => "/proxy/audio",
            Self::Subtitle => "/proxy/subtitle",
        }
    }

    /// Look up a role by its route path (without prefix).
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.path() == path)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Playlist => "playlist",
            Self::Segment => "segment",
            Self::Key => "key",
            Self::Audio => "audio",
            Self::Subtitle => "subtitle",
        };
        f.write_str(name)
    }
}

/// A role plus the absolute origin URL it proxies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxiedRoute {
    pub role: Role,
    pub origin: String,
}

impl ProxiedRoute {
    pub fn new(role: Role, origin: impl Into<String>) -> Self {
        Self {
            role,
            origin: origin.into(),
        }
    }

    /// Render as `<prefix><role-path>?url=<encoded>[&h=<encoded>]`.
    ///
    /// The origin URL is percent-encoded exactly once here.
    pub fn render(&self, prefix: &str, headers: Option<&str>) -> String {
        let encoded = urlencoding::encode(&self.origin);
        let mut route = String::with_capacity(
            prefix.len() + self.role.path().len() + encoded.len() + 5,
        );
        route.push_str(prefix);
        route.push_str(self.role.path());
        route.push_str("?url=");
        route.push_str(&encoded);
        if let Some(h) = headers.filter(|h| !h.is_empty()) {
            route.push_str("&h=");
            route.push_str(&urlencoding::encode(h));
        }
        route
    }
}

/// Render the provider key route under `prefix`.
pub fn provider_key_route(prefix: &str) -> String {
    format!("{}{}", prefix, PROVIDER_KEY_PATH)
}

/// Whether `uri` already points at one of this proxy's routes.
pub fn is_proxied(uri: &str, prefix: &str) -> bool {
    let Some(rest) = uri.trim().strip_prefix(prefix) else {
        return false;
    };
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    if path == PROVIDER_KEY_PATH {
        return true;
    }
    Role::from_path(path).is_some() && query.split('&').any(|pair| pair.starts_with("url="))
}
