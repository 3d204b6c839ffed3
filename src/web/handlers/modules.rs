//! Module catalog handler, consumed by the SPA to render forms and tables.

use axum::Json;
use serde::Serialize;

use crate::registry;

#[derive(Debug, Serialize)]
pub struct ModuleInfo {
    pub modulo: &'static str,
    pub tabla: &'static str,
    pub clave_primaria: &'static str,
    pub columnas: Vec<&'static str>,
    pub supervisado: bool,
}

/// List registered modules: GET /v1/modulos
pub async fn list_modules() -> Json<Vec<ModuleInfo>> {
    let modules = registry::all_modules()
        .iter()
        .map(|spec| ModuleInfo {
            modulo: spec.slug,
            tabla: spec.table,
            clave_primaria: spec.primary_key,
            columnas: spec.columns.to_vec(),
            supervisado: spec.supervised,
        })
        .collect();

    Json(modules)
}
