//! `WebDAV` XML types.

mod depth;
mod href;
mod multistatus;
mod namespace;
mod property;
mod propfind;

pub use depth::Depth;
pub use href::{Href, RFC_3986, decode_segment, encode_segment};
pub use multistatus::{Multistatus, Propstat, PropstatResponse, Status};
pub use namespace::{CALDAV_NS, CS_NS, DAV_NS, Namespace, QName, caldav_props, cs_props, dav_props};
pub use property::{DavProperty, PropertyValue};
pub use propfind::{PropfindRequest, PropfindType};
