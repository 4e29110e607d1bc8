use crate::error::Result;
use crate::handlers::page::PageContext;
use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct IndexTemplate {
    page: PageContext,
}

/// GET / - public landing page
pub async fn index_handler(session: Session) -> Result<impl IntoResponse> {
    Ok(IndexTemplate {
        page: PageContext::load(&session).await?,
    })
}
