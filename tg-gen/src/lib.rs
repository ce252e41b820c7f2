#![deny(
    // This is overly strict, of course. The intent is somewhat of a "quality seal," less to fix everything, and more to force us to add inline allows, which are even more needlessly verbose, but give us a mechanism to say "we think this is okay, but you might want to take a second look here."
    clippy::nursery,
    clippy::pedantic,
    // These are also just for clinic purposes
    missing_docs,
    clippy::missing_docs_in_private_items,
)]

//! # tg-gen – synthetic node forest generator
//!
//! tg-gen produces large, realistic-looking fixtures for systems that consume tree-shaped event
//! data (for example CDN delivery graphs) without touching production data.
//!
//! ## Pipeline overview
//! 1. Generation ([`generate_forest`](crate::forest::generate_forest)) – build `n` records whose
//!    `source` is either the root sentinel or the id of an earlier record, with depth capped at
//!    `max_level`.
//! 2. Serialization ([`write_records`](crate::output::write_records)) – stream the records to disk
//!    as JSON Lines or as a single JSON array.
//! 3. Export ([`export_csv`](crate::export::export_csv)) – optionally read the file back, detect its
//!    layout, and re-emit it as CSV.
//!
//! [`pipeline::run`] chains the three stages. All randomness comes from one explicitly passed
//! random source, so a seeded run is byte-for-byte reproducible.

pub mod export;
pub mod forest;
pub mod model;
pub mod output;
pub mod pipeline;

pub use export::{
    export_csv,
    ExportOutcome,
};
pub use forest::{
    generate_forest,
    ConfigError,
    ForestConfig,
};
pub use model::{
    NodeRecord,
    Source,
    ROOT_SENTINEL,
};
pub use output::{
    write_records,
    OutputFormat,
};
pub use pipeline::{
    run,
    RunConfig,
    RunSummary,
};

#[cfg(test)]
mod tests;
