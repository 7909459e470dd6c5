//! PROPFIND request XML parsing.

use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;

use super::error::{ParseError, ParseResult};
use crate::rfc::dav::core::{DAV_NS, Namespace, PropfindRequest, PropfindType, QName};

/// Which child of `<propfind>` the reader is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Prop,
    Include,
}

/// One reader event, detached from the read buffer.
enum Step {
    /// An element start; `true` unless self-closing.
    Open(QName, bool),
    Close,
    Skip,
    Eof,
}

/// Parses a PROPFIND request body.
///
/// ## Summary
/// An empty body, or one without any element, is an `allprop` request.
/// Otherwise the root must be `DAV:propfind` holding exactly one of `prop`,
/// `allprop` or `propname`; property names keep the order they appear in.
/// Elements without a namespace are read as `DAV:`.
///
/// ## Errors
/// Returns an error if the XML is malformed, uses an undeclared prefix, has a
/// root other than `propfind`, or names more than one request type.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_propfind(xml: &[u8]) -> ParseResult<PropfindRequest> {
    if xml.iter().all(u8::is_ascii_whitespace) {
        tracing::debug!("Empty PROPFIND body, returning allprop");
        return Ok(PropfindRequest::allprop());
    }

    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut section = Section::None;
    let mut propfind_type: Option<PropfindType> = None;
    let mut properties: Vec<QName> = Vec::new();
    let mut include: Vec<QName> = Vec::new();

    loop {
        let step = {
            let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
            match event {
                Event::Start(ref e) => Step::Open(qualify(resolved, e.local_name().as_ref())?, true),
                Event::Empty(ref e) => Step::Open(qualify(resolved, e.local_name().as_ref())?, false),
                Event::End(_) => Step::Close,
                Event::Eof => Step::Eof,
                _ => Step::Skip,
            }
        };
        buf.clear();

        let (name, is_start) = match step {
            Step::Open(name, is_start) => (name, is_start),
            Step::Close => {
                depth = depth.saturating_sub(1);
                if depth == 1 {
                    section = Section::None;
                }
                continue;
            }
            Step::Skip => continue,
            Step::Eof if depth > 0 => {
                return Err(ParseError::xml("unexpected end of document"));
            }
            Step::Eof => break,
        };

        match depth {
            0 => {
                if !name.is(DAV_NS, "propfind") {
                    return Err(ParseError::unexpected_element(&name.to_string()));
                }
                seen_root = true;
            }
            1 if name.namespace_uri() == DAV_NS => {
                let kind = match name.local_name() {
                    "allprop" => Some(PropfindType::AllProp {
                        include: Vec::new(),
                    }),
                    "propname" => Some(PropfindType::PropName),
                    "prop" => {
                        section = Section::Prop;
                        Some(PropfindType::Prop(Vec::new()))
                    }
                    "include" => {
                        section = Section::Include;
                        None
                    }
                    _ => None,
                };
                if let Some(kind) = kind {
                    if propfind_type.is_some() {
                        return Err(ParseError::unexpected_element(&name.to_string()));
                    }
                    propfind_type = Some(kind);
                }
            }
            2 => match section {
                Section::Prop => properties.push(name),
                Section::Include => include.push(name),
                Section::None => {}
            },
            _ => {}
        }

        if is_start {
            depth += 1;
        } else if depth == 1 {
            section = Section::None;
        }
    }

    if !seen_root {
        tracing::debug!("PROPFIND body without elements, returning allprop");
        return Ok(PropfindRequest::allprop());
    }

    let request = match propfind_type {
        Some(PropfindType::PropName) => PropfindRequest::propname(),
        Some(PropfindType::Prop(_)) => PropfindRequest::prop(properties),
        Some(PropfindType::AllProp { .. }) | None => PropfindRequest::allprop_with_include(include),
    };

    tracing::debug!(?request.propfind_type, "Parsed PROPFIND request");
    Ok(request)
}

/// Builds a `QName` from a resolved namespace and a local name.
fn qualify(resolved: ResolveResult<'_>, local_name: &[u8]) -> ParseResult<QName> {
    let local_name = std::str::from_utf8(local_name)?.to_owned();
    let namespace = match resolved {
        ResolveResult::Bound(ns) => Namespace::from(std::str::from_utf8(ns.as_ref())?.to_owned()),
        ResolveResult::Unbound => Namespace::DAV,
        ResolveResult::Unknown(prefix) => {
            return Err(ParseError::unknown_prefix(&String::from_utf8_lossy(&prefix)));
        }
    };
    Ok(QName::new(namespace, local_name))
}
