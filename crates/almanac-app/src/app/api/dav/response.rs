//! Writing handler responses back to salvo.

use almanac_service::caldav::DavResponse;
use salvo::Response;
use salvo::http::HeaderValue;

use crate::error::AppError;

/// ## Summary
/// Copies status, headers and body of a handler response onto `res`.
///
/// ## Side Effects
/// Header values that are not valid HTTP header text are logged and dropped.
pub fn write_response(res: &mut Response, response: DavResponse) {
    res.status_code(response.status);

    for (name, value) in response.headers {
        match HeaderValue::from_str(&value) {
            Ok(header_value) => {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "Header addition failure is non-fatal"
                )]
                let _ = res.add_header(name, header_value, false);
            }
            Err(e) => tracing::warn!(header = %name, error = %e, "Dropping invalid header value"),
        }
    }

    if let Some(body) = response.body
        && let Err(e) = res.write_body(body)
    {
        tracing::error!(error = %e, "Failed to write response body");
    }
}

/// ## Summary
/// Answers a request that failed before reaching the resource handler.
pub fn write_error(res: &mut Response, err: &AppError) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::debug!(error = %err, status = status.as_u16(), "Request rejected");
    }
    res.status_code(status);
}
