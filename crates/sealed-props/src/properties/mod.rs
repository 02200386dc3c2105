//! The encrypted properties engine.
//!
//! # Modules
//!
//! - [`store`] — `PropertyStore`, the in-memory ordered key/value set.
//! - [`codec`] — sealed line format: one `key=<base64 ciphertext>` per entry.
//! - [`plaintext`] — plain `key=value` import/export format.
//! - [`escape`] — escaping rules shared by both line formats.
//! - [`loader`] — `load_properties`: fresh, plaintext or sealed sources.
//! - [`persister`] — `store_properties`: atomic sealed writes.
//!
//! ```text
//! load_properties ──▶ PropertyStore ──add()──▶ store_properties ──▶ codec ──▶ file
//! ```

pub mod codec;
pub mod escape;
pub mod loader;
pub mod persister;
pub mod plaintext;
pub mod store;

pub use loader::load_properties;
pub use persister::store_properties;
pub use plaintext::{parse_plaintext, write_plaintext};
pub use store::PropertyStore;
