pub mod archivo;
pub mod denuncia;
pub mod empleado;
pub mod tramite;
pub mod vecino;

pub use archivo::{Archivo, ArchivoEliminado};
pub use denuncia::{Denuncia, EstadoDenuncia};
pub use empleado::Empleado;
pub use tramite::{EstadoTramite, Tramite};
pub use vecino::Vecino;
