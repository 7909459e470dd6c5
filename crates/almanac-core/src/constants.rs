/// Route component constants shared across crates
pub const CALDAV_ROUTE_COMPONENT: &str = "caldav";
pub const CALDAV_ROUTE_PREFIX: &str = const_str::concat!("/", CALDAV_ROUTE_COMPONENT);

pub const PRINCIPALS_ROUTE_COMPONENT: &str = "principals";
pub const PRINCIPAL_USERS_COMPONENT: &str = "users";
pub const PRINCIPAL_USERS_PREFIX: &str = const_str::concat!(
    "/",
    PRINCIPALS_ROUTE_COMPONENT,
    "/",
    PRINCIPAL_USERS_COMPONENT
);

/// Well-known collection names that never denote a calendar id.
pub const SCHEDULE_INBOX_COMPONENT: &str = "schedule-inbox";
pub const SCHEDULE_INBOX_PREFIX: &str =
    const_str::concat!(CALDAV_ROUTE_PREFIX, "/", SCHEDULE_INBOX_COMPONENT);
/// Advertised for scheduling discovery; the outbox holds no resources.
pub const SCHEDULE_OUTBOX_COMPONENT: &str = "schedule-outbox";

/// File extension of calendar object resources.
pub const CALENDAR_OBJECT_EXTENSION: &str = ".ics";

pub const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";
pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Compliance classes advertised in the `DAV` response header.
pub const DAV_COMPLIANCE: &str = "1, calendar-access, calendar-schedule";
pub const ALLOWED_METHODS: &str = "OPTIONS, GET, HEAD, PUT, DELETE, PROPFIND";
