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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Shared test helpers used across integration suites.
//! Layout: memory.rs (in-memory `Directory`), fixtures.rs (seed records), postgres.rs (disposable databases).

pub mod fixtures;
pub mod memory;
pub mod postgres;

pub use memory::MemoryDirectory;
