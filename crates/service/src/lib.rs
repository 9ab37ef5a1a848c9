pub mod auth;
pub mod matching;
pub mod parser;
pub mod remote;
pub mod store;
