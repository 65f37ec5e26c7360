//! AI portal routes.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::services::now_ms;
use crate::services::portal::{
    BestPractice, Department, EnablementResource, GeneratedContent, PortalError, PortalSection, example_prompt,
};
use crate::state::AppState;

pub(crate) fn portal_error_to_status(err: &PortalError) -> StatusCode {
    match err {
        PortalError::DepartmentNotFound(_) => StatusCode::NOT_FOUND,
        PortalError::NothingGenerated => StatusCode::UNPROCESSABLE_ENTITY,
        PortalError::UnknownSection(_) => StatusCode::BAD_REQUEST,
    }
}

fn portal_error(err: &PortalError) -> ApiError {
    ApiError::from_err(portal_error_to_status(err), err)
}

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    pub section: String,
    pub text: String,
    #[serde(default)]
    pub department_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExamplePrompt {
    pub section: PortalSection,
    pub text: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Generated {
    pub section: PortalSection,
    pub count: usize,
    #[serde(flatten)]
    pub content: GeneratedContent,
}

/// `GET /api/portal/departments`
pub async fn list_departments(State(state): State<AppState>) -> Json<Vec<Department>> {
    Json(state.portal.read().await.departments.clone())
}

/// `GET /api/portal/departments/{id}`
pub async fn get_department(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Department> {
    let portal = state.portal.read().await;
    portal.department(&id).cloned().map(Json).map_err(|e| portal_error(&e))
}

/// `GET /api/portal/best-practices`
pub async fn best_practices(State(state): State<AppState>) -> Json<Vec<BestPractice>> {
    Json(state.portal.read().await.best_practices.clone())
}

/// `GET /api/portal/enablement`
pub async fn enablement(State(state): State<AppState>) -> Json<Vec<EnablementResource>> {
    Json(state.portal.read().await.enablement.clone())
}

/// `GET /api/portal/examples/{section}`: sample text for the generator.
pub async fn example(Path(section): Path<String>) -> ApiResult<ExamplePrompt> {
    let section: PortalSection = section.parse().map_err(|e| portal_error(&e))?;
    Ok(Json(ExamplePrompt { section, text: example_prompt(section) }))
}

/// `POST /api/portal/generate`: turn pasted text into portal cards.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<(StatusCode, Json<Generated>), ApiError> {
    let section: PortalSection = body.section.parse().map_err(|e| portal_error(&e))?;
    let department_id = body.department_id.as_deref().map(str::trim).filter(|id| !id.is_empty());

    let mut portal = state.portal.write().await;
    let content = portal
        .apply_generated(section, &body.text, department_id, &mut rand::rng(), now_ms())
        .map_err(|e| portal_error(&e))?;
    Ok((StatusCode::CREATED, Json(Generated { section, count: content.len(), content })))
}

#[cfg(test)]
#[path = "portal_test.rs"]
mod tests;
