//! Document categories and their display metadata.
//!
//! The backend tags every document with a category string. Known tags map to
//! a [`DocumentCategory`] variant; anything else lands in [`DocumentCategory::Otros`]
//! so a document is never dropped for carrying a tag we do not know.

/// Static metadata attached to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMeta {
    /// Folder name inside the archive, also used in entry file names.
    pub prefix: &'static str,
    /// Human-readable label for listings.
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentCategory {
    Tramite,
    FacturaVenta,
    PagoCliente,
    NotaCredito,
    FacturaCosto,
    PagoProveedor,
    NcProveedor,
    Otros,
}

const TRAMITE: CategoryMeta = CategoryMeta {
    prefix: "TRAMITE",
    label: "Documentos del trámite",
};
const FACTURA_VENTA: CategoryMeta = CategoryMeta {
    prefix: "FACTURA",
    label: "Facturas de venta",
};
const PAGO_CLIENTE: CategoryMeta = CategoryMeta {
    prefix: "PAGO",
    label: "Pagos de cliente",
};
const NOTA_CREDITO: CategoryMeta = CategoryMeta {
    prefix: "NC",
    label: "Notas de crédito",
};
const FACTURA_COSTO: CategoryMeta = CategoryMeta {
    prefix: "COSTO",
    label: "Facturas de costo",
};
const PAGO_PROVEEDOR: CategoryMeta = CategoryMeta {
    prefix: "PAGO_PROV",
    label: "Pagos a proveedor",
};
const NC_PROVEEDOR: CategoryMeta = CategoryMeta {
    prefix: "NC_PROV",
    label: "Notas de crédito de proveedor",
};
const OTROS: CategoryMeta = CategoryMeta {
    prefix: "DOC",
    label: "Otros documentos",
};

impl DocumentCategory {
    /// Every category, in the order the document center lists them.
    pub const ALL: [DocumentCategory; 8] = [
        DocumentCategory::Tramite,
        DocumentCategory::FacturaVenta,
        DocumentCategory::PagoCliente,
        DocumentCategory::NotaCredito,
        DocumentCategory::FacturaCosto,
        DocumentCategory::PagoProveedor,
        DocumentCategory::NcProveedor,
        DocumentCategory::Otros,
    ];

    /// Parse a backend tag. Unknown tags fall back to `Otros`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "tramite" => DocumentCategory::Tramite,
            "factura_venta" => DocumentCategory::FacturaVenta,
            "pago_cliente" => DocumentCategory::PagoCliente,
            "nota_credito" => DocumentCategory::NotaCredito,
            "factura_costo" => DocumentCategory::FacturaCosto,
            "pago_proveedor" => DocumentCategory::PagoProveedor,
            "nc_proveedor" => DocumentCategory::NcProveedor,
            "otros" => DocumentCategory::Otros,
            other => {
                tracing::debug!(tag = other, "Unknown document category, using generic folder");
                DocumentCategory::Otros
            }
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            DocumentCategory::Tramite => "tramite",
            DocumentCategory::FacturaVenta => "factura_venta",
            DocumentCategory::PagoCliente => "pago_cliente",
            DocumentCategory::NotaCredito => "nota_credito",
            DocumentCategory::FacturaCosto => "factura_costo",
            DocumentCategory::PagoProveedor => "pago_proveedor",
            DocumentCategory::NcProveedor => "nc_proveedor",
            DocumentCategory::Otros => "otros",
        }
    }

    pub fn meta(self) -> &'static CategoryMeta {
        match self {
            DocumentCategory::Tramite => &TRAMITE,
            DocumentCategory::FacturaVenta => &FACTURA_VENTA,
            DocumentCategory::PagoCliente => &PAGO_CLIENTE,
            DocumentCategory::NotaCredito => &NOTA_CREDITO,
            DocumentCategory::FacturaCosto => &FACTURA_COSTO,
            DocumentCategory::PagoProveedor => &PAGO_PROVEEDOR,
            DocumentCategory::NcProveedor => &NC_PROVEEDOR,
            DocumentCategory::Otros => &OTROS,
        }
    }

    pub fn prefix(self) -> &'static str {
        self.meta().prefix
    }

    pub fn label(self) -> &'static str {
        self.meta().label
    }
}

impl std::fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
