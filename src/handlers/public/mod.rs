pub mod auth;
pub mod auth_vecino;
pub mod bootstrap;
pub mod utils;
