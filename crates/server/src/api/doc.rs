//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers and `ToSchema`-derived
//! types into a single OpenAPI 3.1 spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "taskhub API",
        version = "0.1.0",
        description = "In-memory task management over REST.",
    ),
    tags(
        (name = "Health", description = "Server readiness"),
        (name = "Tasks", description = "Task CRUD, completion filter and priority lookup"),
    ),
    paths(
        crate::api::health::health,
        crate::api::tasks::create_task,
        crate::api::tasks::list_tasks,
        crate::api::tasks::list_tasks_by_priority,
        crate::api::tasks::get_task,
        crate::api::tasks::update_task,
        crate::api::tasks::delete_task,
    ),
    components(schemas(
        taskhub_core::Task,
        taskhub_core::Priority,
        crate::api::tasks::TaskBody,
        crate::api::error::ErrorBody,
        crate::api::health::HealthResponse,
    ))
)]
pub struct ApiDoc;
