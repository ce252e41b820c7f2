#![deny(
    // This is overly strict, of course. The intent is somewhat of a "quality seal," less to fix everything, and more to force us to add inline allows, which are even more needlessly verbose, but give us a mechanism to say "we think this is okay, but you might want to take a second look here."
    clippy::nursery,
    clippy::pedantic,
    // These are also just for clinic purposes
    missing_docs,
    clippy::missing_docs_in_private_items,
)]

//! # tg-core – shared building blocks for the treegen tools
//!
//! Leaf utilities with no knowledge of the forest itself: crate-standard logging, random
//! identifiers drawn from an injected random source, and uniform sampling of instants inside a
//! UTC time window.

pub mod ids;
pub mod logging;
pub mod time;

pub use ids::random_id;
pub use time::{
    TimeWindow,
    TimeWindowError,
};

#[cfg(test)]
mod tests;
