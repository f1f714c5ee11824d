pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

pub use error::AppError;
pub use routes::{create_router, Route};
pub use server::HttpServer;
pub use state::AppState;
pub use views::Views;
