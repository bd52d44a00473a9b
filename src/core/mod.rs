pub mod find;
pub mod patterns;
pub mod query;
pub mod song;
pub mod text;
