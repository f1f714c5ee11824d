pub mod doc_ref;
pub mod error;
pub mod list_item;
pub mod media;
pub mod search;
pub mod status;

pub use doc_ref::DocRef;
pub use error::ModelError;
pub use list_item::{DocumentAck, ListItem, StoredItem};
pub use media::{parse_media_id, MediaType};
pub use search::{MediaDetail, SearchPage, SearchResult};
pub use status::WatchStatus;
