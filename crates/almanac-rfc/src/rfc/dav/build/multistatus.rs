//! Multistatus XML serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{RfcError, RfcResult};
use crate::rfc::dav::core::{
    CALDAV_NS, CS_NS, DAV_NS, DavProperty, Multistatus, PropertyValue, PropstatResponse, QName,
};

type XmlResult = Result<(), quick_xml::Error>;

/// Serializes a multistatus response to XML.
///
/// ## Summary
/// Writes a `D:multistatus` document declaring the `D`, `C` and `CS`
/// prefixes. Responses and properties are written in the order given.
/// Properties from any other namespace get an inline `xmlns:X` declaration.
///
/// ## Errors
/// Returns `RfcError::XmlWrite` if the writer fails.
pub fn serialize_multistatus(multistatus: &Multistatus) -> RfcResult<String> {
    write_document(multistatus).map_err(|err| {
        tracing::error!(%err, "Failed to write multistatus XML");
        RfcError::XmlWrite(err.to_string())
    })
}

fn write_document(multistatus: &Multistatus) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut elem = BytesStart::new("D:multistatus");
    elem.push_attribute(("xmlns:D", DAV_NS));
    elem.push_attribute(("xmlns:C", CALDAV_NS));
    elem.push_attribute(("xmlns:CS", CS_NS));
    writer.write_event(Event::Start(elem))?;

    for response in &multistatus.responses {
        write_response(&mut writer, response)?;
    }

    writer.write_event(Event::End(BytesEnd::new("D:multistatus")))?;

    // Every byte written came from a `&str`.
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_response<W: std::io::Write>(writer: &mut Writer<W>, response: &PropstatResponse) -> XmlResult {
    writer.write_event(Event::Start(BytesStart::new("D:response")))?;
    write_text_element(writer, "D:href", response.href.as_str())?;

    for propstat in &response.propstats {
        writer.write_event(Event::Start(BytesStart::new("D:propstat")))?;
        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;
        for prop in &propstat.properties {
            write_property(writer, prop)?;
        }
        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;
        write_text_element(writer, "D:status", &propstat.status.status_line())?;
        writer.write_event(Event::End(BytesEnd::new("D:propstat")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("D:response")))?;
    Ok(())
}

fn write_property<W: std::io::Write>(writer: &mut Writer<W>, prop: &DavProperty) -> XmlResult {
    let elem_name = element_name(&prop.name);
    let ns = prop.name.namespace_uri();

    let value = match &prop.value {
        None | Some(PropertyValue::Empty) => {
            writer.write_event(Event::Empty(open_element(&elem_name, ns)))?;
            return Ok(());
        }
        Some(value) => value,
    };

    writer.write_event(Event::Start(open_element(&elem_name, ns)))?;
    match value {
        PropertyValue::Empty => {}
        PropertyValue::Text(text) => {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        PropertyValue::Href(href) => {
            write_text_element(writer, "D:href", href.as_str())?;
        }
        PropertyValue::HrefSet(hrefs) => {
            for href in hrefs {
                write_text_element(writer, "D:href", href.as_str())?;
            }
        }
        PropertyValue::HttpDate(at) => {
            let formatted = at.format("%a, %d %b %Y %H:%M:%S GMT").to_string();
            writer.write_event(Event::Text(BytesText::new(&formatted)))?;
        }
        PropertyValue::ResourceType(types) => {
            for rt in types {
                writer.write_event(Event::Empty(BytesStart::new(element_name(rt).as_str())))?;
            }
        }
        PropertyValue::SupportedComponents(components) => {
            for comp in components {
                let mut comp_elem = BytesStart::new("C:comp");
                comp_elem.push_attribute(("name", comp.as_str()));
                writer.write_event(Event::Empty(comp_elem))?;
            }
        }
        PropertyValue::SupportedReports(reports) => {
            for report in reports {
                writer.write_event(Event::Start(BytesStart::new("D:supported-report")))?;
                writer.write_event(Event::Start(BytesStart::new("D:report")))?;
                writer.write_event(Event::Empty(BytesStart::new(element_name(report).as_str())))?;
                writer.write_event(Event::End(BytesEnd::new("D:report")))?;
                writer.write_event(Event::End(BytesEnd::new("D:supported-report")))?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(elem_name.as_str())))?;

    Ok(())
}

/// Starts a property element, declaring its namespace when it has no fixed prefix.
fn open_element<'a>(elem_name: &'a str, ns: &str) -> BytesStart<'a> {
    let mut start = BytesStart::new(elem_name);
    if namespace_prefix(ns).is_none() {
        start.push_attribute(("xmlns:X", ns));
    }
    start
}

fn write_text_element<W: std::io::Write>(writer: &mut Writer<W>, name: &str, text: &str) -> XmlResult {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn element_name(name: &QName) -> String {
    let prefix = namespace_prefix(name.namespace_uri()).unwrap_or("X");
    format!("{prefix}:{}", name.local_name())
}

fn namespace_prefix(ns: &str) -> Option<&'static str> {
    match ns {
        DAV_NS => Some("D"),
        CALDAV_NS => Some("C"),
        CS_NS => Some("CS"),
        _ => None,
    }
}
