pub mod add;
pub mod config;
pub mod find;
pub mod list;
pub mod prompts;
pub mod search;
pub mod table;
