//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Creating a test Salvo service backed by a fresh in-memory store
//! - Making HTTP requests
//! - Asserting on responses

use std::sync::Arc;

use salvo::http::header::HeaderName;
use salvo::http::{Method, ReqBody, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt, TestClient};

use almanac_test::app::caldav_handler::{CalDavHandlerProvider, build_handler};
use almanac_test::component::config::*;

/// Base path every test service mounts its DAV routes under.
pub const BASE_PATH: &str = "/dav";

/// User every single-user test service authenticates as.
pub const TEST_USER: &str = "tester";

/// Header the proxy-auth test service reads the user from.
pub const PROXY_USER_HEADER: &str = "X-Remote-User";

/// Test configuration - static struct instead of loading from file.
#[must_use]
pub fn test_config() -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
            serve_origin: None,
            base_path: BASE_PATH.to_string(),
        },
        auth: AuthConfig {
            method: AuthMethod::SingleUser,
            proxy: None,
            single_user: Some(SingleUserAuthConfig {
                name: TEST_USER.to_string(),
                email: None,
            }),
        },
        caldav: CalDavConfig {
            default_calendar: "calendar".to_string(),
            default_calendar_display_name: "Calendar".to_string(),
            product_id: "-//Almanac//Test//EN".to_string(),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    }
}

/// Test configuration with proxy authentication.
#[must_use]
pub fn proxy_config() -> Settings {
    let mut config = test_config();
    config.auth = AuthConfig {
        method: AuthMethod::Proxy,
        proxy: Some(ProxyAuthConfig {
            user_header: PROXY_USER_HEADER.to_string(),
        }),
        single_user: None,
    };
    config
}

/// ## Summary
/// Creates a test service from `config` with its own empty store.
///
/// The router matches the one assembled in `main.rs`.
#[must_use]
pub fn create_service_with(config: &Settings) -> Service {
    let handler = Arc::new(build_handler(config));
    let router = Router::new()
        .hoop(ConfigHandler {
            settings: config.clone(),
        })
        .hoop(CalDavHandlerProvider { handler })
        .push(almanac_test::app::api::routes());
    Service::new(router)
}

/// Creates a single-user test service with its own empty store.
#[must_use]
pub fn create_test_service() -> Service {
    create_service_with(&test_config())
}

/// Path of a calendar collection.
#[must_use]
pub fn collection_path(collection: &str) -> String {
    format!("{BASE_PATH}/caldav/{collection}/")
}

/// Path of a calendar object in a collection.
#[must_use]
pub fn object_path(collection: &str, object_id: &str) -> String {
    format!("{BASE_PATH}/caldav/{collection}/{object_id}.ics")
}

/// Test request builder for constructing HTTP requests.
pub struct TestRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl TestRequest {
    /// Creates a new test request with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn options(path: &str) -> Self {
        Self::new(Method::OPTIONS, path)
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn head(path: &str) -> Self {
        Self::new(Method::HEAD, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Creates a new PROPFIND request.
    #[must_use]
    pub fn propfind(path: &str) -> Self {
        Self::new(
            Method::from_bytes(b"PROPFIND").expect("Valid method"),
            path,
        )
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets the Depth header.
    #[must_use]
    pub fn depth(self, depth: &str) -> Self {
        self.header("Depth", depth)
    }

    /// Sets the If-Match header.
    #[must_use]
    pub fn if_match(self, etag: &str) -> Self {
        self.header("If-Match", etag)
    }

    /// Sets the If-None-Match header.
    #[must_use]
    pub fn if_none_match(self, etag: &str) -> Self {
        self.header("If-None-Match", etag)
    }

    /// Sets the Content-Type header.
    #[must_use]
    pub fn content_type(self, content_type: &str) -> Self {
        self.header("Content-Type", content_type)
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets an XML request body.
    #[must_use]
    pub fn xml_body(self, xml: &str) -> Self {
        self.content_type("application/xml; charset=utf-8")
            .body(xml.as_bytes().to_vec())
    }

    /// Sets an iCalendar request body.
    #[must_use]
    pub fn icalendar_body(self, ical: &str) -> Self {
        self.content_type("text/calendar; charset=utf-8")
            .body(ical.as_bytes().to_vec())
    }

    /// Sends the request to the test service and returns the response.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);

        let mut client = match self.method.as_str() {
            "GET" => TestClient::get(&url),
            "HEAD" => TestClient::head(&url),
            "PUT" => TestClient::put(&url),
            "DELETE" => TestClient::delete(&url),
            "OPTIONS" => TestClient::options(&url),
            // Custom methods (PROPFIND) go through RequestBuilder directly
            _ => RequestBuilder::new(&url, self.method.clone()),
        };

        for (name, value) in self.headers {
            if let Ok(header_name) = HeaderName::try_from(name.as_str()) {
                client = client.add_header(header_name, value, true);
            }
        }

        if let Some(body_bytes) = self.body {
            client = client.body(ReqBody::Once(body_bytes.into()));
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body: Vec<u8> = response.take_bytes(None).await.unwrap_or_default().to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {}: {}",
            self.status,
            self.body_string()
        );
        self
    }

    /// Asserts that a header exists with the expected value.
    #[must_use]
    pub fn assert_header(self, name: &str, expected: &str) -> Self {
        let value = self.get_header(name);
        assert!(value.is_some(), "Header '{name}' not found in response");
        assert_eq!(
            value,
            Some(expected),
            "Header '{name}' expected '{expected}' but got '{value:?}'"
        );
        self
    }

    /// Asserts that a header exists (regardless of value).
    #[must_use]
    pub fn assert_header_exists(self, name: &str) -> Self {
        assert!(
            self.get_header(name).is_some(),
            "Header '{name}' not found in response"
        );
        self
    }

    /// Asserts that a header contains the expected substring.
    #[must_use]
    pub fn assert_header_contains(self, name: &str, expected: &str) -> Self {
        let value = self.get_header(name).unwrap_or_default();
        assert!(
            value.contains(expected),
            "Header '{name}' expected to contain '{expected}' but got '{value}'"
        );
        self
    }

    /// Asserts that the response body contains the expected substring.
    #[must_use]
    pub fn assert_body_contains(self, expected: &str) -> Self {
        let body = self.body_string();
        assert!(
            body.contains(expected),
            "Expected body to contain '{expected}' but got:\n{body}"
        );
        self
    }

    /// Asserts that the response body does not contain the specified substring.
    #[must_use]
    pub fn assert_body_not_contains(self, unexpected: &str) -> Self {
        let body = self.body_string();
        assert!(
            !body.contains(unexpected),
            "Expected body to NOT contain '{unexpected}' but got:\n{body}"
        );
        self
    }

    /// Asserts that the response body is empty.
    #[must_use]
    pub fn assert_body_empty(self) -> Self {
        assert!(
            self.body.is_empty(),
            "Expected empty body but got {} bytes",
            self.body.len()
        );
        self
    }

    /// Returns the body as a UTF-8 string.
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Gets the ETag header value.
    #[must_use]
    pub fn get_etag(&self) -> Option<&str> {
        self.get_header("ETag")
    }

    /// Counts the number of `<D:response>` elements in a multistatus response.
    #[must_use]
    pub fn count_multistatus_responses(&self) -> usize {
        self.body_string().matches("<D:response>").count()
    }

    /// Returns the unfolded first `VEVENT` property line named `prefix`,
    /// e.g. `"DTSTART"`. Lines inside `VTIMEZONE` are skipped.
    #[must_use]
    pub fn ical_line(&self, prefix: &str) -> Option<String> {
        let body = self.body_string().replace("\r\n ", "");
        body.lines()
            .map(|line| line.trim_end_matches('\r'))
            .skip_while(|line| *line != "BEGIN:VEVENT")
            .find(|line| {
                line.strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with(':') || rest.starts_with(';'))
            })
            .map(str::to_string)
    }
}

/// Minimal iCalendar event in UTC.
#[must_use]
pub fn sample_icalendar_event(uid: &str, summary: &str) -> String {
    format!(
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Almanac//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:{uid}\r\n\
DTSTAMP:20260125T120000Z\r\n\
DTSTART:20260126T100000Z\r\n\
DTEND:20260126T110000Z\r\n\
SUMMARY:{summary}\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n"
    )
}

/// iCalendar event with local times in `tzid`.
///
/// `start` and `end` are `YYYYMMDDTHHMMSS` wall-clock values.
#[must_use]
pub fn zoned_event(uid: &str, summary: &str, tzid: &str, start: &str, end: &str) -> String {
    format!(
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Almanac//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:{uid}\r\n\
DTSTAMP:20260125T120000Z\r\n\
DTSTART;TZID={tzid}:{start}\r\n\
DTEND;TZID={tzid}:{end}\r\n\
SUMMARY:{summary}\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n"
    )
}

/// iCalendar event with local times in `tzid` and an RRULE.
#[must_use]
pub fn recurring_event(uid: &str, tzid: &str, start: &str, end: &str, rrule: &str) -> String {
    format!(
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Almanac//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:{uid}\r\n\
DTSTAMP:20260125T120000Z\r\n\
DTSTART;TZID={tzid}:{start}\r\n\
DTEND;TZID={tzid}:{end}\r\n\
SUMMARY:Recurring\r\n\
RRULE:{rrule}\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n"
    )
}

/// PROPFIND body requesting every supported property.
#[must_use]
pub fn propfind_allprop() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:">
  <D:allprop/>
</D:propfind>"#
}

/// PROPFIND body requesting specific properties as (namespace, name) pairs.
#[must_use]
pub fn propfind_props(props: &[(&str, &str)]) -> String {
    let prop_elements: String = props
        .iter()
        .map(|(ns, name)| {
            if *ns == "DAV:" {
                format!("    <D:{name}/>")
            } else {
                format!("    <x:{name} xmlns:x=\"{ns}\"/>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:">
  <D:prop>
{prop_elements}
  </D:prop>
</D:propfind>"#
    )
}
