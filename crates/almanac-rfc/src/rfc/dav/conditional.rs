//! `If-Match` / `If-None-Match` evaluation (RFC 9110 §13).

use std::fmt;

/// An entity tag as sent in a conditional header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTag {
    pub weak: bool,
    /// Tag text without the surrounding quotes.
    pub opaque: String,
}

impl EntityTag {
    #[must_use]
    pub fn strong(opaque: impl Into<String>) -> Self {
        Self {
            weak: false,
            opaque: opaque.into(),
        }
    }

    /// ## Summary
    /// Parses a single tag: `"abc"`, `W/"abc"` or a bare token.
    ///
    /// Bare tokens are accepted as if quoted; some clients omit the quotes.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (weak, rest) = match s.strip_prefix("W/") {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let opaque = rest
            .strip_prefix('"')
            .and_then(|r| r.strip_suffix('"'))
            .unwrap_or(rest);
        if opaque.is_empty() || opaque.contains('"') {
            return None;
        }
        Some(Self {
            weak,
            opaque: opaque.to_string(),
        })
    }

    /// Strong comparison: both tags strong and equal.
    #[must_use]
    pub fn strong_eq(&self, other: &Self) -> bool {
        !self.weak && !other.weak && self.opaque == other.opaque
    }

    /// Weak comparison: equal opaque text, weakness ignored.
    #[must_use]
    pub fn weak_eq(&self, other: &Self) -> bool {
        self.opaque == other.opaque
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weak {
            f.write_str("W/")?;
        }
        write!(f, "\"{}\"", self.opaque)
    }
}

/// Value of an `If-Match` or `If-None-Match` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagList {
    /// `*`
    Any,
    Tags(Vec<EntityTag>),
}

impl TagList {
    /// Parses a comma-separated list of entity tags, or `*`.
    ///
    /// Malformed entries are dropped.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim() == "*" {
            return Self::Any;
        }
        Self::Tags(split_tags(value).filter_map(EntityTag::parse).collect())
    }
}

/// Splits a header value on commas outside quoted strings.
fn split_tags(value: &str) -> impl Iterator<Item = &str> {
    let mut in_quotes = false;
    value
        .split(move |c: char| {
            if c == '"' {
                in_quotes = !in_quotes;
            }
            c == ',' && !in_quotes
        })
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

/// The conditional headers of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionalHeaders {
    pub if_match: Option<TagList>,
    pub if_none_match: Option<TagList>,
}

impl ConditionalHeaders {
    /// Builds from raw header values.
    #[must_use]
    pub fn from_values(if_match: Option<&str>, if_none_match: Option<&str>) -> Self {
        Self {
            if_match: if_match.map(TagList::parse),
            if_none_match: if_none_match.map(TagList::parse),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.if_match.is_none() && self.if_none_match.is_none()
    }
}

/// What the conditional headers are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// A single resource; `None` when it does not exist.
    Resource(Option<&'a str>),
    /// A collection, which has no comparable entity tag.
    Collection,
}

/// Whether the request method only reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodSafety {
    /// GET, HEAD, PROPFIND, OPTIONS.
    Safe,
    /// PUT, DELETE.
    Unsafe,
}

/// Outcome of evaluating the conditional headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    /// 304, only for safe methods.
    NotModified,
    /// 412
    PreconditionFailed,
}

/// Evaluates conditional headers against the current state of the target.
///
/// ## Summary
/// `If-Match` is checked first: `*` passes when the target exists, a list
/// passes when one tag matches the current tag by strong comparison. A
/// failure is `PreconditionFailed` for every method.
///
/// `If-None-Match` is checked next: `*` fails when the resource exists, a
/// list fails when one tag matches by weak comparison. Failure is
/// `NotModified` for safe methods and `PreconditionFailed` otherwise.
///
/// A collection never fails `If-None-Match`: it has no tag to compare, so
/// the request proceeds and is answered normally.
#[must_use]
pub fn evaluate(headers: &ConditionalHeaders, target: Target<'_>, safety: MethodSafety) -> Decision {
    if headers.is_empty() {
        return Decision::Proceed;
    }

    let current = match target {
        Target::Resource(etag) => etag.and_then(EntityTag::parse),
        Target::Collection => None,
    };
    let exists = !matches!(target, Target::Resource(None));

    if let Some(if_match) = &headers.if_match {
        let passes = match if_match {
            TagList::Any => exists,
            TagList::Tags(tags) => current
                .as_ref()
                .is_some_and(|cur| tags.iter().any(|tag| tag.strong_eq(cur))),
        };
        if !passes {
            tracing::debug!(?target, "If-Match failed");
            return Decision::PreconditionFailed;
        }
    }

    if let Some(if_none_match) = &headers.if_none_match {
        if matches!(target, Target::Collection) {
            tracing::debug!("If-None-Match against a collection, proceeding");
            return Decision::Proceed;
        }

        let matched = match if_none_match {
            TagList::Any => exists,
            TagList::Tags(tags) => current
                .as_ref()
                .is_some_and(|cur| tags.iter().any(|tag| tag.weak_eq(cur))),
        };
        if matched {
            tracing::debug!(?target, ?safety, "If-None-Match matched");
            return match safety {
                MethodSafety::Safe => Decision::NotModified,
                MethodSafety::Unsafe => Decision::PreconditionFailed,
            };
        }
    }

    Decision::Proceed
}
