use std::fmt::{Display, Formatter};

/// Request methods known to the legacy runtime.
///
/// The set is closed: anything the host delivers outside of it becomes
/// [`LegacyMethod::Invalid`], and callers are expected to reject that
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyMethod {
    Options,
    Get,
    Head,
    Post,
    Put,
    Delete,
    Trace,
    Connect,
    Invalid,
}

impl LegacyMethod {
    /// Maps a host verb onto the legacy enumeration. Never fails.
    pub fn resolve(method: &str) -> Self {
        match method {
            "OPTIONS" => Self::Options,
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "TRACE" => Self::Trace,
            "CONNECT" => Self::Connect,
            _ => Self::Invalid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Options => "OPTIONS",
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Trace => "TRACE",
            Self::Connect => "CONNECT",
            Self::Invalid => "INVALID",
        }
    }

    pub fn is_invalid(&self) -> bool {
        *self == Self::Invalid
    }
}

impl Display for LegacyMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&http::Method> for LegacyMethod {
    fn from(method: &http::Method) -> Self {
        Self::resolve(method.as_str())
    }
}
