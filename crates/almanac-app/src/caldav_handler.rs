use std::sync::Arc;

use almanac_core::config::Settings;
use almanac_core::error::CoreError;
use almanac_rfc::rfc::ical::ICalCodec;
use almanac_service::caldav::CalDavResourceHandler;
use almanac_service::dav::ResourceAddressResolver;
use almanac_service::store::{BackingStore, InMemoryStore};
use salvo::async_trait;

use crate::error::AppResult;

/// Injects the shared resource handler into every request's depot.
pub struct CalDavHandlerProvider {
    pub handler: Arc<CalDavResourceHandler>,
}

#[async_trait]
impl salvo::Handler for CalDavHandlerProvider {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.handler));
    }
}

/// ## Summary
/// Builds the resource handler described by `settings`, backed by an
/// in-memory store.
#[must_use]
pub fn build_handler(settings: &Settings) -> CalDavResourceHandler {
    let codec = ICalCodec::new(settings.caldav.product_id.as_str());
    let store: Arc<dyn BackingStore> = Arc::new(InMemoryStore::new(
        codec.clone(),
        settings.caldav.default_calendar.as_str(),
        settings.caldav.default_calendar_display_name.as_str(),
    ));
    let resolver = ResourceAddressResolver::new(&settings.server.normalized_base_path());
    tracing::debug!(base_path = resolver.base_path(), "Resource handler built");
    CalDavResourceHandler::new(store, resolver, codec)
}

/// ## Summary
/// Retrieves the resource handler from the depot.
///
/// ## Errors
/// Returns an error if the handler is not found in the depot.
pub fn get_handler_from_depot(depot: &salvo::Depot) -> AppResult<Arc<CalDavResourceHandler>> {
    depot
        .obtain::<Arc<CalDavResourceHandler>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Resource handler not found in depot").into())
}
