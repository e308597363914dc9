//! Message loading: `.eml` files, raw-bytes-to-tree mapping, and header decoding.

pub mod eml;
pub mod header;
pub mod mime;

pub use eml::parse_eml;
pub use mime::parse_message;
