use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(ToSchema)]
pub struct CustomerRequestDoc {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

#[derive(ToSchema)]
pub struct AddressRequestDoc {
    pub address_details: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::customers::create,
        crate::routes::customers::list,
        crate::routes::customers::get,
        crate::routes::customers::update,
        crate::routes::customers::delete,
        crate::routes::addresses::create,
        crate::routes::addresses::list,
        crate::routes::addresses::update,
        crate::routes::addresses::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            CustomerRequestDoc,
            AddressRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "customers"),
        (name = "addresses")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_api_path() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for p in [
            "/health",
            "/api/customers",
            "/api/customers/{id}",
            "/api/customers/{id}/addresses",
            "/api/addresses/{address_id}",
        ] {
            assert!(paths.contains(&p), "missing {p}");
        }
    }
}
