mod comprobante;
mod importes;
mod proveedor;

pub use comprobante::{Comprobante, ComprobanteCreado, FiltroComprobantes, NuevoComprobante};
pub use importes::ImportesComprobante;
pub use proveedor::{CondicionFiscal, NuevoProveedor, Proveedor, filtrar_proveedores};
