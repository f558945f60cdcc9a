// src/index/mod.rs
// =============================================================================
// Text search over crawled images.
//
// Submodules:
// - tokenize: text and URLs -> terms
// - build: stored images -> documents + inverted index with idf weights
// - search: query terms -> ranked hits
// =============================================================================

mod build;
mod search;
mod tokenize;

pub use build::{build_index, ImageIndex, IndexedImage, TermEntry};
pub use search::{hits, rank, SearchHit};
pub use tokenize::tokenize;
