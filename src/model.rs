pub mod dsl;
pub mod layer;
pub mod project;
