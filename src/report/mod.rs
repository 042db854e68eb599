pub mod annotation;
pub mod json;
pub mod terminal;
