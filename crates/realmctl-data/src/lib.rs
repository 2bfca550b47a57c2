#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Shared data access layer for realmctl: models, the `Directory` repository
//! seam, and its Postgres implementation.

pub mod directory;
pub mod error;
pub mod model;
pub mod store;

pub use directory::{Directory, UserFilter, UserMatch};
pub use error::{DataError, Result as DataResult};
pub use model::{Client, Realm, SERVER_CLIENT_NAME, UserProfile};
pub use store::PgDirectory;
