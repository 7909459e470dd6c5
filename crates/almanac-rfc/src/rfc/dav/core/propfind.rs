//! PROPFIND request types.

use super::namespace::QName;

/// A parsed PROPFIND request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropfindRequest {
    pub propfind_type: PropfindType,
}

impl PropfindRequest {
    #[must_use]
    pub fn allprop() -> Self {
        Self::allprop_with_include(Vec::new())
    }

    #[must_use]
    pub fn allprop_with_include(include: Vec<QName>) -> Self {
        Self {
            propfind_type: PropfindType::AllProp { include },
        }
    }

    #[must_use]
    pub fn propname() -> Self {
        Self {
            propfind_type: PropfindType::PropName,
        }
    }

    #[must_use]
    pub fn prop(properties: Vec<QName>) -> Self {
        Self {
            propfind_type: PropfindType::Prop(properties),
        }
    }

    #[must_use]
    pub fn is_allprop(&self) -> bool {
        matches!(self.propfind_type, PropfindType::AllProp { .. })
    }

    #[must_use]
    pub fn is_propname(&self) -> bool {
        matches!(self.propfind_type, PropfindType::PropName)
    }

    /// Returns the requested properties for a `prop` request, in request order.
    #[must_use]
    pub fn requested_properties(&self) -> Option<&[QName]> {
        match &self.propfind_type {
            PropfindType::Prop(props) => Some(props),
            _ => None,
        }
    }
}

impl Default for PropfindRequest {
    fn default() -> Self {
        Self::allprop()
    }
}

/// The type of PROPFIND request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropfindType {
    /// Every supported property, plus any explicitly included names.
    AllProp { include: Vec<QName> },
    /// Property names without values.
    PropName,
    /// Specific properties.
    Prop(Vec<QName>),
}
