use almanac_core::config::{AuthMethod, Settings};
use almanac_core::error::CoreError;
use almanac_service::store::RequestContext;
use salvo::Depot;
use tracing::error;

use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult};

pub mod depot_keys {
    pub const AUTHENTICATED_PRINCIPAL: &str = "__authenticated_principal";
}

/// ## Summary
/// Resolves the user a request acts as from the configured authentication
/// method.
///
/// ## Errors
/// Returns `AppError::NotAuthenticated` if proxy authentication is
/// configured and the request lacks a non-empty user header, and an
/// invariant violation if the selected method has no configuration block.
pub fn authenticate(req: &salvo::Request, settings: &Settings) -> AppResult<RequestContext> {
    match settings.auth.method {
        AuthMethod::SingleUser => {
            let single_user = settings.auth.single_user.as_ref().ok_or(
                CoreError::InvariantViolation("Single user config is missing"),
            )?;
            Ok(RequestContext::new(single_user.name.as_str()))
        }
        AuthMethod::Proxy => {
            let proxy = settings
                .auth
                .proxy
                .as_ref()
                .ok_or(CoreError::InvariantViolation("Proxy auth config is missing"))?;
            req.headers()
                .get(proxy.user_header.as_str())
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|user| !user.is_empty())
                .map(RequestContext::new)
                .ok_or(AppError::NotAuthenticated)
        }
    }
}

/// ## Summary
/// Retrieves the authenticated request context from the depot.
///
/// ## Errors
/// Returns `AppError::NotAuthenticated` if the middleware stored none.
pub fn get_context_from_depot(depot: &Depot) -> AppResult<RequestContext> {
    depot
        .get::<RequestContext>(depot_keys::AUTHENTICATED_PRINCIPAL)
        .cloned()
        .map_err(|_err| AppError::NotAuthenticated)
}

/// ## Summary
/// Authentication middleware that resolves the request's user and stores it in the depot.
///
/// OPTIONS requests pass through unauthenticated.
///
/// ## Errors
/// Sends 401 Unauthorized if the user cannot be determined, 500 if the
/// configuration is missing or incomplete.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        if req.method() == salvo::http::Method::OPTIONS {
            return;
        }

        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        match authenticate(req, &config) {
            Ok(context) => {
                tracing::debug!(user = %context.user, "User authenticated successfully");
                depot.insert(depot_keys::AUTHENTICATED_PRINCIPAL, context);
            }
            Err(AppError::NotAuthenticated) => {
                tracing::debug!("Request carries no user, rejecting");
                res.status_code(salvo::http::StatusCode::UNAUTHORIZED);
                ctrl.skip_rest();
            }
            Err(e) => {
                error!(error = ?e, "Authentication failed with error");
                res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
            }
        }
    }
}

/// ## Summary
/// Middleware handler for authentication.
/// Use this as a handler in routes to protect them with authentication.
pub struct AuthMiddleware;
