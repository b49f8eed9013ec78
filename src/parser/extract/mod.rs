//! Environment and marker extractors. Each one re-checks which variant is
//! present; the classifier only settles the category.

pub mod code;
pub mod list;
pub mod math;
pub mod meta;
