//! Catalog Browse Routes

use axum::Json;
use dtc_model::Severity;
use serde::Serialize;

/// One row in the browsable catalog listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSummary {
    pub code: String,
    pub title: String,
    pub severity: Severity,
}

/// Response for the catalog endpoint
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub data: Vec<CodeSummary>,
    pub count: usize,
}

/// List the built-in catalog, sorted by code
pub async fn list_codes() -> Json<CatalogResponse> {
    let mut data: Vec<CodeSummary> = code_catalog::seed_records()
        .into_iter()
        .map(|record| CodeSummary {
            code: record.code,
            title: record.title,
            severity: record.severity,
        })
        .collect();
    data.sort_by(|a, b| a.code.cmp(&b.code));

    Json(CatalogResponse {
        count: data.len(),
        data,
    })
}
