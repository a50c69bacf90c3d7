pub mod handlers;
pub mod reports;
pub mod routes;
pub mod tenants;

pub use routes::create_router;
