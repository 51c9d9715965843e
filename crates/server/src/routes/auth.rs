use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, Method, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use models::staff::StaffRole;
use service::auth::domain::{AuthIdentity, AuthSession, LoginInput};
use service::auth::errors::AuthError;
use service::auth::AuthService;
use service::customer::CustomerService;
use service::files::FileStore;
use service::measurement::MeasurementService;
use service::order::OrderService;
use service::staff::StaffService;

use crate::errors::JsonApiError;
use crate::metrics;

pub const AUTH_COOKIE: &str = "auth_token";
pub const SUPERVISORS: &[StaffRole] = &[StaffRole::Admin, StaffRole::Manager];
pub const ADMINS: &[StaffRole] = &[StaffRole::Admin];

#[derive(Clone)]
pub struct ServerState {
    pub auth: AuthService,
    pub staff: StaffService,
    pub customers: CustomerService,
    pub measurements: MeasurementService,
    pub orders: OrderService,
    pub files: FileStore,
    pub max_request_bytes: usize,
}

/// The verified caller, placed in request extensions by [`require_bearer_token_state`].
#[derive(Debug, Clone)]
pub struct AuthStaff(pub AuthIdentity);

impl AuthStaff {
    /// The caller when their role is one of `roles`, 403 otherwise.
    pub fn require(&self, roles: &[StaffRole]) -> Result<&AuthIdentity, JsonApiError> {
        if roles.contains(&self.0.role) {
            Ok(&self.0)
        } else {
            tracing::warn!(staff_id = %self.0.id, role = %self.0.role, "role_gate_denied");
            Err(JsonApiError::forbidden("insufficient role"))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthStaff
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthIdentity>()
            .cloned()
            .map(AuthStaff)
            .ok_or_else(|| JsonApiError::unauthorized("missing credentials"))
    }
}

fn auth_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in"), (status = 401, description = "Invalid username or security pin")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<AuthSession>), JsonApiError> {
    match state.auth.login(input).await {
        Ok(session) => {
            metrics::record_login("success");
            let jar = jar.add(auth_cookie(session.token.clone()));
            Ok((jar, Json(session)))
        }
        Err(e) => {
            let outcome = match &e {
                AuthError::InvalidUsername => "invalid_username",
                AuthError::InvalidPin => "invalid_pin",
                AuthError::Validation(_) => "invalid_input",
                _ => "error",
            };
            metrics::record_login(outcome);
            Err(e.into())
        }
    }
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/auth/me", tag = "auth", responses((status = 200, description = "Current staff identity"), (status = 401, description = "Unauthorized")))]
pub async fn me(AuthStaff(who): AuthStaff) -> Json<AuthIdentity> {
    Json(who)
}

fn is_public(method: &Method, path: &str) -> bool {
    *method == Method::OPTIONS
        || path == "/health"
        || path == "/metrics"
        || path == "/api/auth/login"
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
}

/// Global middleware: everything except the public routes and CORS preflight
/// needs `Authorization: Bearer <token>` or the `auth_token` cookie.
/// Missing, malformed, invalid or expired tokens are all 401.
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    if is_public(req.method(), &path) {
        return Ok(next.run(req).await);
    }

    let authz = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let token = match authz {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(t) => t.trim().to_string(),
            None => {
                tracing::warn!(%path, "invalid Authorization format (expect Bearer)");
                return Err(JsonApiError::unauthorized("expected a Bearer token"));
            }
        },
        // fall back to the cookie set at login
        None => match CookieJar::from_headers(req.headers()).get(AUTH_COOKIE) {
            Some(c) if !c.value().is_empty() => c.value().to_string(),
            _ => {
                tracing::warn!(%path, "missing Authorization header and auth_token cookie");
                return Err(JsonApiError::unauthorized("missing token"));
            }
        },
    };

    match state.auth.verify_token(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims.identity());
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(%path, err = %e, "token validation failed");
            Err(JsonApiError::unauthorized("invalid or expired token"))
        }
    }
}
