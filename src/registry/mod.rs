//! Per-module table registry.
//!
//! Every plant module (gate access, truck weighing, agronomy, laboratory,
//! logistics, training, users) maps onto one table that exists with the
//! same shape in both the main and staging databases. The registry is the
//! single place SQL identifiers come from: table names, primary-key
//! columns, and the filter/sort allow-list are compile-time constants, and
//! request input is never used to build an identifier. Values, in
//! contrast, are always bound as parameters by the store layer.

/// One module's table description, shared by both stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    /// URL segment identifying the module (`/v1/<slug>/...`).
    pub slug: &'static str,
    /// Table name, identical in the main and staging databases.
    pub table: &'static str,
    /// Primary-key column. Ids arrive as strings and are compared as text.
    pub primary_key: &'static str,
    /// Columns the list endpoint may filter or sort on.
    pub columns: &'static [&'static str],
    /// Default ordering column when the request names none.
    pub default_order: &'static str,
    /// Whether records of this module go through supervisory approval.
    pub supervised: bool,
}

impl TableSpec {
    /// Whether `column` is on this module's filter/sort allow-list.
    pub fn allows_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }
}

/// Registered plant modules, one table spec each.
///
/// `usuarios` is administration data and does not go through supervision;
/// it only gets the listing endpoint.
pub const MODULES: &[TableSpec] = &[
    TableSpec {
        slug: "porteria",
        table: "accesos",
        primary_key: "acceso_id",
        columns: &[
            "acceso_id",
            "documento",
            "nombre",
            "tipo_acceso",
            "placa",
            "fecha",
            "supervision",
        ],
        default_order: "acceso_id",
        supervised: true,
    },
    TableSpec {
        slug: "bascula",
        table: "pesajes",
        primary_key: "pesaje_id",
        columns: &[
            "pesaje_id",
            "placa",
            "conductor",
            "proveedor",
            "peso_bruto",
            "peso_tara",
            "peso_neto",
            "fecha",
            "supervision",
        ],
        default_order: "pesaje_id",
        supervised: true,
    },
    TableSpec {
        slug: "agronomia",
        table: "plagas",
        primary_key: "plagas_id",
        columns: &[
            "plagas_id",
            "lote",
            "plaga",
            "severidad",
            "responsable",
            "fecha",
            "supervision",
        ],
        default_order: "plagas_id",
        supervised: true,
    },
    TableSpec {
        slug: "laboratorio",
        table: "mediciones",
        primary_key: "medicion_id",
        columns: &[
            "medicion_id",
            "tanque",
            "acidez",
            "humedad",
            "impurezas",
            "analista",
            "fecha",
            "supervision",
        ],
        default_order: "medicion_id",
        supervised: true,
    },
    TableSpec {
        slug: "logistica",
        table: "viajes",
        primary_key: "viaje_id",
        columns: &[
            "viaje_id",
            "origen",
            "destino",
            "placa",
            "conductor",
            "estado",
            "fecha_salida",
            "supervision",
        ],
        default_order: "viaje_id",
        supervised: true,
    },
    TableSpec {
        slug: "capacitacion",
        table: "capacitaciones",
        primary_key: "capacitacion_id",
        columns: &[
            "capacitacion_id",
            "tema",
            "instructor",
            "area",
            "fecha",
            "supervision",
        ],
        default_order: "capacitacion_id",
        supervised: true,
    },
    TableSpec {
        slug: "usuarios",
        table: "usuarios",
        primary_key: "usuario_id",
        columns: &["usuario_id", "documento", "nombre", "rol", "activo"],
        default_order: "usuario_id",
        supervised: false,
    },
];

/// Look up a module by its URL slug.
pub fn find_module(slug: &str) -> Option<&'static TableSpec> {
    MODULES.iter().find(|spec| spec.slug == slug)
}

/// All registered modules, for the catalog endpoint.
pub fn all_modules() -> &'static [TableSpec] {
    MODULES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_module() {
        let spec = find_module("agronomia").expect("agronomia should be registered");
        assert_eq!(spec.table, "plagas");
        assert_eq!(spec.primary_key, "plagas_id");
        assert!(spec.supervised);
    }

    #[test]
    fn test_find_unknown_module() {
        assert!(find_module("contabilidad").is_none());
    }

    #[test]
    fn test_usuarios_not_supervised() {
        let spec = find_module("usuarios").expect("usuarios should be registered");
        assert!(!spec.supervised);
    }

    #[test]
    fn test_column_allow_list() {
        let spec = find_module("bascula").unwrap();
        assert!(spec.allows_column("peso_neto"));
        assert!(!spec.allows_column("peso_neto; DROP TABLE pesajes"));
        assert!(!spec.allows_column("password"));
    }

    #[test]
    fn test_every_module_allows_its_own_primary_key() {
        for spec in all_modules() {
            assert!(
                spec.allows_column(spec.primary_key),
                "{} must allow filtering on {}",
                spec.slug,
                spec.primary_key
            );
            assert!(
                spec.allows_column(spec.default_order),
                "{} default order column must be allow-listed",
                spec.slug
            );
        }
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<_> = all_modules().iter().map(|s| s.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), all_modules().len());
    }
}
