//! Grounding prompt construction for pdfchat.
//!
//! A single fixed template instructs the generation model to answer only
//! from the supplied document context and to say so explicitly when the
//! answer is absent.

pub mod builder;

pub use builder::{build_grounding_prompt, GROUNDING_TEMPLATE};
