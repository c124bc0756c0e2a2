use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/hackathons", hackathon_routes())
        .routes(routes!(handlers::export::export_all))
        .routes(routes!(handlers::export::seed_remote))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::auth::login))
}

fn hackathon_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::hackathon::list_hackathons,
            handlers::hackathon::save_hackathons
        ))
        .routes(routes!(
            handlers::hackathon::get_hackathon,
            handlers::hackathon::update_hackathon
        ))
        .routes(routes!(handlers::data::get_data, handlers::data::save_data))
        .routes(routes!(handlers::data::apply_edits))
        .routes(routes!(handlers::export::export_hackathon))
        .routes(routes!(handlers::hackathon::leaderboard))
        .routes(routes!(handlers::hackathon::team_page))
        .routes(routes!(handlers::hackathon::get_project))
}
