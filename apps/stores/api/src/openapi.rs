use axum_helpers::BearerSecurity;
use utoipa::OpenApi;

/// Shared components; the domain documents are merged in by [`api_doc`].
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    modifiers(&BearerSecurity),
    info(
        description = "Stores, their items and tags, and the accounts that manage them"
    )
)]
pub struct ApiDoc;

/// The full document with the configured title and version.
pub fn api_doc(title: &str, version: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(domain_stores::ApiDoc::openapi());
    doc.merge(domain_items::ApiDoc::openapi());
    doc.merge(domain_tags::ApiDoc::openapi());
    doc.merge(domain_users::ApiDoc::openapi());

    doc.info.title = title.to_string();
    doc.info.version = version.to_string();
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_covers_every_domain() {
        let doc = api_doc("Stores REST API", "v1");
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in ["/store", "/item/{id}", "/tag/{id}", "/login", "/user/{id}"] {
            assert!(paths.contains(&path), "missing {}", path);
        }
        assert_eq!(doc.info.title, "Stores REST API");
        assert_eq!(doc.info.version, "v1");
    }
}
