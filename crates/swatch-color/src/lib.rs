//! swatch-color
//!
//! Hex color decoding and nearest-color ranking over a polish catalog. See
//! `hex` for the accepted color syntax and `rank` for the ordering contract.
pub mod hex;
pub mod rank;

pub use hex::{parse_hex, Rgb};
pub use rank::{rank_by_similarity, DEFAULT_TOP_N};
