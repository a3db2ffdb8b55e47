use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation. Paths are collected from the routers.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Authentication related endpoints"),
        (name = "Schedule", description = "Careers, groups, and weekly timetables"),
        (name = "Exams", description = "Exam calendar, generation, and review"),
        (name = "Health", description = "Liveness probes"),
    ),
    info(
        title = "Exam Scheduling API",
        version = "1.0.0",
        description = "Academic scheduling administration API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
