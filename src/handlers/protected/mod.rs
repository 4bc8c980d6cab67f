pub mod archivos;
pub mod auth;
pub mod denuncias;
pub mod empleados;
pub mod tramites;
pub mod vecinos;
