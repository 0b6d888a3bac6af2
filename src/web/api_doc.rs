use utoipa::OpenApi;

use super::api::balloons::BalloonsResponse;
use super::api::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(super::api::balloons::get_balloons),
    components(schemas(BalloonsResponse, ErrorResponse)),
    info(
        title = "Balloon Tracker API",
        description = "Balloon trajectories reconstructed from the last 24 hourly position snapshots",
        version = "0.1.0"
    ),
    tags(
        (name = "balloons", description = "Trajectory reconstruction")
    )
)]
pub struct ApiDoc;
