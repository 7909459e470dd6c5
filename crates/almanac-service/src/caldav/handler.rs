//! Per-request coordination of address resolution, conditional checks,
//! transcoding and property discovery.

use std::sync::Arc;

use almanac_core::constants::{
    ALLOWED_METHODS, CALENDAR_CONTENT_TYPE, DAV_COMPLIANCE, XML_CONTENT_TYPE,
};
use almanac_core::model::{Collection, Principal};
use almanac_rfc::rfc::dav::build::serialize_multistatus;
use almanac_rfc::rfc::dav::conditional::{ConditionalHeaders, Decision, MethodSafety, Target, evaluate};
use almanac_rfc::rfc::dav::core::Depth;
use almanac_rfc::rfc::dav::parse::parse_propfind;
use almanac_rfc::rfc::ical::ICalCodec;
use chrono::{DateTime, Utc};
use salvo::http::StatusCode;
use salvo::http::header::{self, HeaderName};

use crate::dav::{PropertyResponseBuilder, ResourceAddress, ResourceAddressResolver, ResourceView};
use crate::error::{ServiceError, ServiceResult};
use crate::store::{
    BackingStore, DeleteOutcome, PutOutcome, RequestContext, StoreError, StoredEvent,
};

/// Methods the handler dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DavMethod {
    Options,
    Get,
    Head,
    Put,
    Delete,
    Propfind,
}

impl DavMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Options => "OPTIONS",
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Propfind => "PROPFIND",
        }
    }

    #[must_use]
    pub const fn safety(self) -> MethodSafety {
        match self {
            Self::Put | Self::Delete => MethodSafety::Unsafe,
            Self::Options | Self::Get | Self::Head | Self::Propfind => MethodSafety::Safe,
        }
    }
}

/// A transport-independent DAV request.
#[derive(Debug, Clone)]
pub struct DavRequest {
    pub method: DavMethod,
    /// Percent-encoded request path.
    pub path: String,
    /// Raw `Depth` header value.
    pub depth: Option<String>,
    pub conditional: ConditionalHeaders,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

impl DavRequest {
    #[must_use]
    pub fn new(method: DavMethod, path: impl Into<String>, context: RequestContext) -> Self {
        Self {
            method,
            path: path.into(),
            depth: None,
            conditional: ConditionalHeaders::default(),
            body: Vec::new(),
            context,
        }
    }

    #[must_use]
    pub fn with_depth(mut self, depth: impl Into<String>) -> Self {
        self.depth = Some(depth.into());
        self
    }

    #[must_use]
    pub fn with_conditional(mut self, conditional: ConditionalHeaders) -> Self {
        self.conditional = conditional;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// A transport-independent DAV response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DavResponse {
    pub status: StatusCode,
    pub headers: Vec<(HeaderName, String)>,
    pub body: Option<String>,
}

impl DavResponse {
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Answers OPTIONS, GET, HEAD, PUT, DELETE and PROPFIND for calendar
/// objects and collections.
///
/// Each request runs through the same stages: the path is resolved to an
/// address, the conditional headers are evaluated against the addressed
/// resource, then the method is dispatched. Every failure ends in a status
/// code; nothing in request data can make the handler panic.
#[derive(Debug, Clone)]
pub struct CalDavResourceHandler {
    store: Arc<dyn BackingStore>,
    resolver: ResourceAddressResolver,
    codec: ICalCodec,
}

impl CalDavResourceHandler {
    #[must_use]
    pub fn new(store: Arc<dyn BackingStore>, resolver: ResourceAddressResolver, codec: ICalCodec) -> Self {
        Self {
            store,
            resolver,
            codec,
        }
    }

    #[must_use]
    pub fn resolver(&self) -> &ResourceAddressResolver {
        &self.resolver
    }

    /// ## Summary
    /// Handles one request and returns the response to send.
    ///
    /// Errors are mapped to their status codes here; store failures are
    /// logged and become 500.
    #[tracing::instrument(skip(self, request), fields(
        method = request.method.as_str(),
        path = %request.path,
        user = %request.context.user,
        body_len = request.body.len(),
    ))]
    pub async fn handle(&self, request: DavRequest) -> DavResponse {
        let response = match self.dispatch(&request).await {
            Ok(response) => response,
            Err(err) => error_response(&err),
        };
        tracing::info!(status = response.status.as_u16(), "Handled request");
        response
    }

    async fn dispatch(&self, request: &DavRequest) -> ServiceResult<DavResponse> {
        if request.method == DavMethod::Options {
            return Ok(options_response());
        }

        let address = self.resolver.parse(&request.path)?;
        match request.method {
            DavMethod::Options => Ok(options_response()),
            DavMethod::Get => self.get(request, &address, true).await,
            DavMethod::Head => self.get(request, &address, false).await,
            DavMethod::Put => self.put(request, &address).await,
            DavMethod::Delete => self.delete(request, &address).await,
            DavMethod::Propfind => self.propfind(request, &address).await,
        }
    }

    /// Splits an object address, rejecting collection-like addresses.
    fn object_address<'a>(
        method: DavMethod,
        address: &'a ResourceAddress,
    ) -> ServiceResult<(&'a str, &'a str)> {
        match address {
            ResourceAddress::Object {
                collection_id,
                object_id,
            } => Ok((collection_id, object_id)),
            other => Err(ServiceError::MethodNotAllowed(format!(
                "{} on {other:?}",
                method.as_str()
            ))),
        }
    }

    /// Runs the conditional evaluator and turns a failed check into a response.
    fn check_conditions(
        request: &DavRequest,
        target: Target<'_>,
        etag: Option<&str>,
    ) -> ServiceResult<Option<DavResponse>> {
        match evaluate(&request.conditional, target, request.method.safety()) {
            Decision::Proceed => Ok(None),
            Decision::NotModified => {
                tracing::debug!("Conditional request not modified");
                let mut response = DavResponse::new(StatusCode::NOT_MODIFIED);
                if let Some(etag) = etag {
                    response = response.with_header(header::ETAG, etag);
                }
                Ok(Some(response))
            }
            Decision::PreconditionFailed => {
                tracing::warn!(?request.conditional, "Precondition failed");
                Err(ServiceError::PreconditionFailed(request.path.clone()))
            }
        }
    }

    async fn get(
        &self,
        request: &DavRequest,
        address: &ResourceAddress,
        with_body: bool,
    ) -> ServiceResult<DavResponse> {
        let (collection_id, object_id) = Self::object_address(request.method, address)?;
        let principal = self.store.current_principal(&request.context).await?;

        let StoredEvent { event, metadata } = self
            .store
            .get_event(&principal.name, collection_id, object_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(request.path.clone()))?;

        let etag = metadata.etag.as_str();
        if let Some(response) = Self::check_conditions(request, Target::Resource(Some(etag)), Some(etag))? {
            return Ok(response);
        }

        let text = self
            .codec
            .encode(&event)
            .map_err(|err| StoreError::Encode(err.to_string()))?;
        let response = DavResponse::new(StatusCode::OK)
            .with_header(header::CONTENT_TYPE, CALENDAR_CONTENT_TYPE)
            .with_header(header::ETAG, etag)
            .with_header(header::LAST_MODIFIED, http_date(metadata.last_modified));

        Ok(if with_body { response.with_body(text) } else { response })
    }

    async fn put(&self, request: &DavRequest, address: &ResourceAddress) -> ServiceResult<DavResponse> {
        let (collection_id, object_id) = Self::object_address(request.method, address)?;
        let principal = self.store.current_principal(&request.context).await?;

        if self
            .store
            .get_collection_metadata(&principal.name, collection_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!("collection {collection_id}")));
        }

        let current = self
            .store
            .get_event(&principal.name, collection_id, object_id)
            .await?;
        let current_etag = current.as_ref().map(|stored| stored.metadata.etag.as_str());
        if let Some(response) = Self::check_conditions(request, Target::Resource(current_etag), current_etag)? {
            return Ok(response);
        }

        let text = std::str::from_utf8(&request.body)
            .map_err(|err| ServiceError::BadRequest(format!("body is not UTF-8: {err}")))?;
        let event = self.codec.decode(text).inspect_err(|err| {
            tracing::warn!(%err, "Rejected calendar object");
        })?;
        if event.id != object_id {
            tracing::debug!(uid = %event.id, %object_id, "UID differs from resource name");
        }

        let result = self
            .store
            .put_event(&principal.name, collection_id, object_id, event)
            .await?;

        let status = match result.outcome {
            PutOutcome::Created => StatusCode::CREATED,
            PutOutcome::Updated => StatusCode::NO_CONTENT,
        };
        tracing::debug!(?result.outcome, "Stored calendar object");
        Ok(DavResponse::new(status).with_header(header::ETAG, result.metadata.etag))
    }

    async fn delete(&self, request: &DavRequest, address: &ResourceAddress) -> ServiceResult<DavResponse> {
        let (collection_id, object_id) = Self::object_address(request.method, address)?;
        let principal = self.store.current_principal(&request.context).await?;

        let current = self
            .store
            .get_event(&principal.name, collection_id, object_id)
            .await?;
        let current_etag = current.as_ref().map(|stored| stored.metadata.etag.as_str());
        if let Some(response) = Self::check_conditions(request, Target::Resource(current_etag), current_etag)? {
            return Ok(response);
        }

        match self
            .store
            .delete_event(&principal.name, collection_id, object_id)
            .await?
        {
            DeleteOutcome::Deleted => Ok(DavResponse::new(StatusCode::NO_CONTENT)),
            DeleteOutcome::NotFound => Err(ServiceError::NotFound(request.path.clone())),
        }
    }

    #[expect(clippy::too_many_lines)]
    async fn propfind(&self, request: &DavRequest, address: &ResourceAddress) -> ServiceResult<DavResponse> {
        let depth = match request.depth.as_deref() {
            None => Depth::Zero,
            Some(value) => Depth::from_header(value)
                .ok_or_else(|| ServiceError::BadRequest(format!("invalid Depth header: {value}")))?,
        };
        let propfind = parse_propfind(&request.body).map_err(|err| {
            tracing::warn!(%err, "Rejected PROPFIND body");
            ServiceError::BadRequest(err.to_string())
        })?;

        let principal = self.store.current_principal(&request.context).await?;
        let builder = PropertyResponseBuilder::new(&self.resolver, &principal);

        let multistatus = match address {
            ResourceAddress::Root => {
                if let Some(response) = Self::check_conditions(request, Target::Collection, None)? {
                    return Ok(response);
                }
                builder.build(&ResourceView::Root, &[ResourceView::CalendarHome], &propfind, depth)
            }
            ResourceAddress::CalendarHome => {
                if let Some(response) = Self::check_conditions(request, Target::Collection, None)? {
                    return Ok(response);
                }
                let collections = if depth.includes_children() {
                    self.store.list_collections(&principal.name).await?
                } else {
                    Vec::new()
                };
                let children: Vec<ResourceView<'_>> =
                    collections.iter().map(ResourceView::Collection).collect();
                builder.build(&ResourceView::CalendarHome, &children, &propfind, depth)
            }
            ResourceAddress::Collection { collection_id, .. } => {
                let collection = self.collection(&principal, collection_id).await?;
                if let Some(response) = Self::check_conditions(request, Target::Collection, None)? {
                    return Ok(response);
                }
                let objects = if depth.includes_children() {
                    self.store.list_objects(&principal.name, collection_id).await?
                } else {
                    Vec::new()
                };
                let children: Vec<ResourceView<'_>> = objects
                    .iter()
                    .map(|metadata| ResourceView::Object {
                        collection: &collection,
                        metadata,
                    })
                    .collect();
                builder.build(&ResourceView::Collection(&collection), &children, &propfind, depth)
            }
            ResourceAddress::Object {
                collection_id,
                object_id,
            } => {
                let collection = self.collection(&principal, collection_id).await?;
                let stored = self
                    .store
                    .get_event(&principal.name, collection_id, object_id)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound(request.path.clone()))?;
                let etag = stored.metadata.etag.as_str();
                if let Some(response) = Self::check_conditions(request, Target::Resource(Some(etag)), Some(etag))? {
                    return Ok(response);
                }
                let target = ResourceView::Object {
                    collection: &collection,
                    metadata: &stored.metadata,
                };
                builder.build(&target, &[], &propfind, depth)
            }
            ResourceAddress::Principal { user } => {
                let subject = self
                    .store
                    .get_principal(user)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound(request.path.clone()))?;
                if let Some(response) = Self::check_conditions(request, Target::Collection, None)? {
                    return Ok(response);
                }
                builder.build(&ResourceView::Principal(&subject), &[], &propfind, depth)
            }
        };

        let body = serialize_multistatus(&multistatus)?;
        Ok(DavResponse::new(StatusCode::MULTI_STATUS)
            .with_header(header::CONTENT_TYPE, XML_CONTENT_TYPE)
            .with_body(body))
    }

    async fn collection(&self, principal: &Principal, collection_id: &str) -> ServiceResult<Collection> {
        self.store
            .get_collection_metadata(&principal.name, collection_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("collection {collection_id}")))
    }
}

fn options_response() -> DavResponse {
    DavResponse::new(StatusCode::OK)
        .with_header(HeaderName::from_static("dav"), DAV_COMPLIANCE)
        .with_header(header::ALLOW, ALLOWED_METHODS)
}

fn error_response(err: &ServiceError) -> DavResponse {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(%err, "Request failed");
    } else {
        tracing::debug!(%err, status = status.as_u16(), "Request rejected");
    }

    let response = DavResponse::new(status);
    if status == StatusCode::METHOD_NOT_ALLOWED {
        response.with_header(header::ALLOW, ALLOWED_METHODS)
    } else {
        response
    }
}
