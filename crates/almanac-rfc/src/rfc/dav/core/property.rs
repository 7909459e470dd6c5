//! DAV property values.

use chrono::{DateTime, Utc};

use super::href::Href;
use super::namespace::QName;

/// A property name paired with its value.
///
/// `value` is `None` for properties reported by name only (`propname`) and
/// for properties reported with a non-200 status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DavProperty {
    pub name: QName,
    pub value: Option<PropertyValue>,
}

impl DavProperty {
    #[must_use]
    pub fn new(name: QName, value: PropertyValue) -> Self {
        Self {
            name,
            value: Some(value),
        }
    }

    #[must_use]
    pub fn text(name: QName, text: impl Into<String>) -> Self {
        Self::new(name, PropertyValue::Text(text.into()))
    }

    #[must_use]
    pub fn href(name: QName, href: impl Into<Href>) -> Self {
        Self::new(name, PropertyValue::Href(href.into()))
    }

    /// A property without a value.
    #[must_use]
    pub fn name_only(name: QName) -> Self {
        Self { name, value: None }
    }
}

/// Value of a DAV property, rendered by the multistatus serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// An empty element.
    Empty,
    Text(String),
    /// A single `<D:href>` child.
    Href(Href),
    /// Zero or more `<D:href>` children.
    HrefSet(Vec<Href>),
    /// Rendered as an RFC 1123 HTTP date.
    HttpDate(DateTime<Utc>),
    /// Empty child elements naming the resource types.
    ResourceType(Vec<QName>),
    /// `<C:comp name="..."/>` children.
    SupportedComponents(Vec<String>),
    /// `<D:supported-report>` children.
    SupportedReports(Vec<QName>),
}
