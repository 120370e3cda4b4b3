use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

/// Name of the bearer scheme referenced by `security(("jwt" = []))`.
pub const BEARER_SCHEME: &str = "jwt";

/// Registers the bearer JWT security scheme on an OpenAPI document.
///
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(paths(get_item), modifiers(&BearerSecurity))]
/// struct ApiDoc;
/// ```
pub struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[derive(OpenApi)]
    #[openapi(modifiers(&BearerSecurity))]
    struct Doc;

    #[test]
    fn test_scheme_registered() {
        let doc = serde_json::to_value(Doc::openapi()).unwrap();
        let scheme = &doc["components"]["securitySchemes"]["jwt"];
        assert_eq!(scheme["type"], "http");
        assert_eq!(scheme["scheme"], "bearer");
    }
}
