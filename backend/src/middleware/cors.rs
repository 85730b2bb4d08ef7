//! Cross-origin policy for browser clients.

use actix_cors::Cors;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Accept any origin, method and header.
///
/// The browser UI is served from a different port than the API, and the
/// gateway has no authentication model to protect.
#[must_use]
pub fn permissive_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(PREFLIGHT_MAX_AGE_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn preflight_from_other_origin_is_allowed() {
        let app = test::init_service(
            App::new()
                .wrap(permissive_cors())
                .route("/api/users", web::get().to(HttpResponse::Ok)),
        )
        .await;
        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/users")
            .insert_header((header::ORIGIN, "http://localhost:8080"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();

        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:8080")
        );
    }
}
