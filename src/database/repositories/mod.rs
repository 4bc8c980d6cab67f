//! Typed data access for each entity. One repository per table; handlers
//! construct them with the shared pool and convert `sqlx::Error` at the
//! boundary via `ApiError`.

pub mod archivos;
pub mod denuncias;
pub mod empleados;
pub mod tramites;
pub mod vecinos;

pub use archivos::ArchivoRepository;
pub use denuncias::DenunciaRepository;
pub use empleados::EmpleadoRepository;
pub use tramites::TramiteRepository;
pub use vecinos::VecinoRepository;
