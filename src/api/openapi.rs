//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::api::handlers::{account_handler, health_handler};
use crate::types::EmailData;

/// OpenAPI documentation for the codetrack API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Codetrack",
        version = "0.1.0",
        description = "Self-hosted analytics for your code habits",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        health_handler::healthcheck,
        account_handler::register,
        account_handler::login,
        account_handler::logout,
        account_handler::delete_account,
        account_handler::me,
    ),
    components(
        schemas(
            account_handler::AccountRequest,
            account_handler::RegisteredAccount,
            EmailData,
        )
    ),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Accounts", description = "Registration, login and session management")
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI document for a deployment.
///
/// Protected routes reference the `session_cookie` scheme, which names the
/// cookie the session layer actually issues.
pub fn api_doc(cookie_name: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.components
        .get_or_insert_with(Default::default)
        .add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                cookie_name,
                "Signed session cookie issued by /api/accounts/login",
            ))),
        );
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie_scheme(doc: &utoipa::openapi::OpenApi) -> serde_json::Value {
        let json = serde_json::to_value(doc).unwrap();
        json["components"]["securitySchemes"]["session_cookie"].clone()
    }

    #[test]
    fn test_cookie_scheme_uses_configured_name() {
        let scheme = cookie_scheme(&api_doc("ct_session"));
        assert_eq!(scheme["in"], "cookie");
        assert_eq!(scheme["name"], "ct_session");
    }

    #[test]
    fn test_protected_paths_reference_cookie_scheme() {
        let json = serde_json::to_value(api_doc("codetrack")).unwrap();
        let security = &json["paths"]["/api/accounts/me"]["get"]["security"][0];
        assert!(security.get("session_cookie").is_some());
    }
}
