//! Response decoding module
//!
//! Turns raw JSON bodies into the two shapes the fetch strategies consume:
//!
//! - Full collection: `{ "items": [...] }` (record path configurable)
//! - Server page: `{ "data": [...], "next", "previous", "count",
//!   "page_active", "num_pages" }`

mod decoders;
mod types;

pub use decoders::{extract_records, JsonDecoder};
pub use types::{RecordDecoder, ServerPage};
