use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, report::ReportParams},
    server::{
        controller::{admin::ADMIN_TAG, util::guard::require_role},
        error::Error,
        model::{app::AppState, role::Role},
        service::report::{
            render::{render, ReportFormat},
            ReportFilter, ReportService, ReportType,
        },
    },
};

/// Builds a report and returns it as HTML or as a CSV, XLSX or PDF download
///
/// # Responses
/// - 200 (OK): The rendered report; downloads carry
///   `Content-Disposition: attachment; filename="report_{type}.{ext}"`
/// - 400 (Bad Request): Unknown report type or format, or no future race for a lineup report
#[utoipa::path(
    get,
    path = "/admin/reports/export",
    tag = ADMIN_TAG,
    params(ReportParams),
    responses(
        (status = 200, description = "Rendered report as HTML, CSV, XLSX or PDF"),
        (status = 303, description = "Not authorized, redirect to the login page"),
        (status = 400, description = "Invalid report selection", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_report(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ReportParams>,
) -> Result<impl IntoResponse, Error> {
    require_role(&state, &session, &Role::MANAGERS).await?;

    let report_type: ReportType = params.report_type.as_deref().unwrap_or_default().parse()?;
    let format: ReportFormat = params.format.as_deref().unwrap_or_default().parse()?;
    let filter = ReportFilter::new(params.category.as_deref(), params.team.as_deref());

    let report = ReportService::new(&state.db)
        .build(report_type, &filter)
        .await?;
    let rendered = render(&report, format)?;

    tracing::debug!(
        "Exported {} report as {} with {} rows",
        report_type.as_str(),
        format.extension(),
        rendered.rows
    );

    let disposition = rendered
        .filename
        .map(|filename| format!("attachment; filename=\"{}\"", filename))
        .unwrap_or_else(|| "inline".to_string());

    Ok((
        [
            (header::CONTENT_TYPE, rendered.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.body,
    ))
}
