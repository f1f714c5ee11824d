pub mod cloudant;
pub mod error;
pub mod http;
pub mod tmdb;
pub mod traits;

pub use cloudant::CloudantClient;
pub use error::ClientError;
pub use tmdb::TmdbClient;
pub use traits::{DocumentStore, MetadataApi};
