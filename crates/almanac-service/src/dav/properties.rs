//! PROPFIND property resolution and multistatus assembly.

use almanac_core::constants::CALENDAR_CONTENT_TYPE;
use almanac_core::model::{Collection, Principal, ResourceMetadata};
use almanac_core::types::CollectionType;
use almanac_rfc::rfc::dav::core::{
    DavProperty, Depth, Href, Multistatus, PropertyValue, PropfindRequest, PropfindType,
    PropstatResponse, QName, caldav_props, cs_props, dav_props,
};

use super::address::ResourceAddressResolver;

/// A request-scoped view of a resource PROPFIND reports on.
#[derive(Debug, Clone, Copy)]
pub enum ResourceView<'a> {
    Root,
    /// The calendar home of the requesting principal.
    CalendarHome,
    Collection(&'a Collection),
    Object {
        collection: &'a Collection,
        metadata: &'a ResourceMetadata,
    },
    Principal(&'a Principal),
}

/// The closed set of properties the server can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownProperty {
    ResourceType,
    DisplayName,
    GetEtag,
    GetLastModified,
    GetContentType,
    Owner,
    CurrentUserPrincipal,
    PrincipalUrl,
    SupportedReportSet,
    CalendarHomeSet,
    ScheduleInboxUrl,
    ScheduleOutboxUrl,
    SupportedCalendarComponentSet,
    CalendarUserAddressSet,
    GetCtag,
}

impl KnownProperty {
    /// Every known property, in the order `allprop` and `propname` report them.
    pub const ALL: [Self; 15] = [
        Self::ResourceType,
        Self::DisplayName,
        Self::GetEtag,
        Self::GetLastModified,
        Self::GetContentType,
        Self::Owner,
        Self::CurrentUserPrincipal,
        Self::PrincipalUrl,
        Self::SupportedReportSet,
        Self::CalendarHomeSet,
        Self::ScheduleInboxUrl,
        Self::ScheduleOutboxUrl,
        Self::SupportedCalendarComponentSet,
        Self::CalendarUserAddressSet,
        Self::GetCtag,
    ];

    #[must_use]
    pub fn qname(self) -> QName {
        match self {
            Self::ResourceType => QName::dav(dav_props::RESOURCETYPE),
            Self::DisplayName => QName::dav(dav_props::DISPLAYNAME),
            Self::GetEtag => QName::dav(dav_props::GETETAG),
            Self::GetLastModified => QName::dav(dav_props::GETLASTMODIFIED),
            Self::GetContentType => QName::dav(dav_props::GETCONTENTTYPE),
            Self::Owner => QName::dav(dav_props::OWNER),
            Self::CurrentUserPrincipal => QName::dav(dav_props::CURRENT_USER_PRINCIPAL),
            Self::PrincipalUrl => QName::dav(dav_props::PRINCIPAL_URL),
            Self::SupportedReportSet => QName::dav(dav_props::SUPPORTED_REPORT_SET),
            Self::CalendarHomeSet => QName::caldav(caldav_props::CALENDAR_HOME_SET),
            Self::ScheduleInboxUrl => QName::caldav(caldav_props::SCHEDULE_INBOX_URL),
            Self::ScheduleOutboxUrl => QName::caldav(caldav_props::SCHEDULE_OUTBOX_URL),
            Self::SupportedCalendarComponentSet => {
                QName::caldav(caldav_props::SUPPORTED_CALENDAR_COMPONENT_SET)
            }
            Self::CalendarUserAddressSet => QName::caldav(caldav_props::CALENDAR_USER_ADDRESS_SET),
            Self::GetCtag => QName::cs(cs_props::GETCTAG),
        }
    }

    /// Looks up the property a qualified name denotes.
    #[must_use]
    pub fn from_qname(name: &QName) -> Option<Self> {
        Self::ALL.into_iter().find(|prop| prop.qname() == *name)
    }
}

/// Report names advertised in `supported-report-set`.
fn supported_reports() -> Vec<QName> {
    vec![
        QName::caldav("calendar-multiget"),
        QName::caldav("calendar-query"),
    ]
}

/// Builds PROPFIND multistatus documents for one requesting principal.
#[derive(Debug, Clone, Copy)]
pub struct PropertyResponseBuilder<'a> {
    resolver: &'a ResourceAddressResolver,
    /// The principal the request acts as.
    principal: &'a Principal,
}

impl<'a> PropertyResponseBuilder<'a> {
    #[must_use]
    pub fn new(resolver: &'a ResourceAddressResolver, principal: &'a Principal) -> Self {
        Self {
            resolver,
            principal,
        }
    }

    /// Builds a multistatus for `target` and, past depth 0, its `children`.
    ///
    /// ## Summary
    /// Emits one `<response>` for the target followed by one per child when
    /// `depth` includes children. A `prop` request reports each requested
    /// property this resource cannot answer under a 404 propstat; `allprop`
    /// reports every answerable property; `propname` reports their names.
    #[must_use]
    pub fn build(
        &self,
        target: &ResourceView<'_>,
        children: &[ResourceView<'_>],
        request: &PropfindRequest,
        depth: Depth,
    ) -> Multistatus {
        let mut multistatus = Multistatus::new();
        multistatus.add_response(self.response(target, request));

        if depth.includes_children() {
            for child in children {
                multistatus.add_response(self.response(child, request));
            }
        }

        tracing::debug!(responses = multistatus.responses.len(), %depth, "Built multistatus");
        multistatus
    }

    fn response(&self, resource: &ResourceView<'_>, request: &PropfindRequest) -> PropstatResponse {
        let href = self.href(resource);

        match &request.propfind_type {
            PropfindType::Prop(names) => {
                let mut found = Vec::new();
                let mut not_found = Vec::new();
                for name in names {
                    match KnownProperty::from_qname(name).and_then(|prop| self.resolve(prop, resource)) {
                        Some(value) => found.push(DavProperty::new(name.clone(), value)),
                        None => not_found.push(DavProperty::name_only(name.clone())),
                    }
                }
                PropstatResponse::with_found_and_not_found(href, found, not_found)
            }
            PropfindType::AllProp { include } => {
                let mut found: Vec<DavProperty> = KnownProperty::ALL
                    .into_iter()
                    .filter_map(|prop| {
                        self.resolve(prop, resource)
                            .map(|value| DavProperty::new(prop.qname(), value))
                    })
                    .collect();
                let mut not_found = Vec::new();
                for name in include {
                    if found.iter().any(|p| p.name == *name) {
                        continue;
                    }
                    match KnownProperty::from_qname(name).and_then(|prop| self.resolve(prop, resource)) {
                        Some(value) => found.push(DavProperty::new(name.clone(), value)),
                        None => not_found.push(DavProperty::name_only(name.clone())),
                    }
                }
                PropstatResponse::with_found_and_not_found(href, found, not_found)
            }
            PropfindType::PropName => {
                let names = KnownProperty::ALL
                    .into_iter()
                    .filter(|prop| self.resolve(*prop, resource).is_some())
                    .map(|prop| DavProperty::name_only(prop.qname()))
                    .collect();
                PropstatResponse::with_found_and_not_found(href, names, Vec::new())
            }
        }
    }

    fn href(&self, resource: &ResourceView<'_>) -> Href {
        match resource {
            ResourceView::Root => self.resolver.root_href(),
            ResourceView::CalendarHome => self.resolver.home_href(),
            ResourceView::Collection(collection) => self.resolver.collection_href(&collection.id),
            ResourceView::Object {
                collection,
                metadata,
            } => self.resolver.resolve(&collection.id, &metadata.object_id),
            ResourceView::Principal(principal) => self.resolver.principal_href(&principal.name),
        }
    }

    /// Resolves a property on a resource; `None` when the resource has no
    /// such property.
    fn resolve(&self, prop: KnownProperty, resource: &ResourceView<'_>) -> Option<PropertyValue> {
        use ResourceView as R;

        let collection = || QName::dav("collection");
        match (prop, resource) {
            (KnownProperty::ResourceType, R::Root | R::CalendarHome) => {
                Some(PropertyValue::ResourceType(vec![collection()]))
            }
            (KnownProperty::ResourceType, R::Collection(c)) => {
                let kind = match c.collection_type {
                    CollectionType::Calendar => QName::caldav("calendar"),
                    CollectionType::ScheduleInbox => QName::caldav("schedule-inbox"),
                    CollectionType::Principal => QName::dav("principal"),
                };
                Some(PropertyValue::ResourceType(vec![collection(), kind]))
            }
            (KnownProperty::ResourceType, R::Object { .. }) => Some(PropertyValue::Empty),
            (KnownProperty::ResourceType, R::Principal(_)) => Some(PropertyValue::ResourceType(
                vec![collection(), QName::dav("principal")],
            )),

            (KnownProperty::DisplayName, R::Collection(c)) => {
                c.display_name.clone().map(PropertyValue::Text)
            }
            (KnownProperty::DisplayName, R::Principal(p)) => Some(PropertyValue::Text(p.name.clone())),

            (KnownProperty::GetEtag, R::Object { metadata, .. }) => {
                Some(PropertyValue::Text(metadata.etag.clone()))
            }
            (KnownProperty::GetLastModified, R::Object { metadata, .. }) => {
                Some(PropertyValue::HttpDate(metadata.last_modified))
            }
            (KnownProperty::GetContentType, R::Object { .. }) => {
                Some(PropertyValue::Text(CALENDAR_CONTENT_TYPE.to_string()))
            }

            (KnownProperty::Owner, R::Collection(c) | R::Object { collection: c, .. }) => {
                Some(PropertyValue::Href(self.resolver.principal_href(&c.owner)))
            }

            (KnownProperty::CurrentUserPrincipal, _) | (KnownProperty::Owner, R::CalendarHome) => {
                Some(PropertyValue::Href(self.resolver.principal_href(&self.principal.name)))
            }
            (KnownProperty::PrincipalUrl, R::Principal(p)) => {
                Some(PropertyValue::Href(self.resolver.principal_href(&p.name)))
            }

            (
                KnownProperty::SupportedReportSet,
                R::Root | R::CalendarHome | R::Collection(_) | R::Principal(_),
            ) => Some(PropertyValue::SupportedReports(supported_reports())),

            (KnownProperty::CalendarHomeSet, R::Root | R::CalendarHome | R::Principal(_)) => {
                Some(PropertyValue::Href(self.resolver.home_href()))
            }
            (KnownProperty::ScheduleInboxUrl, R::Root | R::CalendarHome | R::Principal(_)) => {
                Some(PropertyValue::Href(self.resolver.schedule_inbox_href()))
            }
            (KnownProperty::ScheduleOutboxUrl, R::Root | R::CalendarHome | R::Principal(_)) => {
                Some(PropertyValue::Href(self.resolver.schedule_outbox_href()))
            }
            (KnownProperty::CalendarUserAddressSet, R::Principal(p)) => {
                let mut hrefs = Vec::new();
                if let Some(email) = &p.email {
                    hrefs.push(Href::new(format!("mailto:{email}")));
                }
                hrefs.push(self.resolver.principal_href(&p.name));
                Some(PropertyValue::HrefSet(hrefs))
            }

            (KnownProperty::SupportedCalendarComponentSet, R::Collection(c))
                if c.collection_type != CollectionType::Principal =>
            {
                Some(PropertyValue::SupportedComponents(c.supported_components.clone()))
            }
            (KnownProperty::GetCtag, R::Collection(c)) => Some(PropertyValue::Text(c.ctag.clone())),

            _ => None,
        }
    }
}
