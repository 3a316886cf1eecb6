//! Serializers for metadata documents.
//!
//! Two formats are supported:
//! - **Turtle** ([`turtle`]): prefixed names, subjects grouped; the default output
//! - **N-Triples** ([`ntriples`]): one triple per line with absolute IRIs, for bulk loading

pub mod ntriples;
pub mod turtle;
