pub mod errors;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use routes::auth::ServerState;
pub use routes::build_router;
pub use startup::serve;
