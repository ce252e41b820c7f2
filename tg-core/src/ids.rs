//! Opaque random identifiers.

use rand::Rng;
use uuid::{
    Builder,
    Uuid,
};

/// Draw a random 128-bit identifier from `rng`.
///
/// The version and variant bits are fixed up to the version-4 layout, so the result renders as the
/// canonical lowercase 8-4-4-4-12 form. Taking the random source explicitly (instead of
/// `Uuid::new_v4`) keeps seeded runs reproducible.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}
