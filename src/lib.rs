//! skilltree - Turn a resume PDF into an interactive skill tree
//!
//! Extracts text from the PDF, classifies the skills with an OpenAI-compatible
//! chat model (xAI by default) or an offline keyword table, builds a named
//! tree and writes it as JSON plus a self-contained D3 page.

pub mod cli;
pub mod config;
pub mod extractor;
pub mod llm;
pub mod pipeline;
pub mod skills;
pub mod tree;
pub mod util;
pub mod writer;
