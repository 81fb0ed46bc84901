mod engine;
mod statement;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use engine::KnowledgeEngine;
pub use statement::Statement;
