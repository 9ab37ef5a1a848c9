pub mod account;
pub mod config;
pub mod error;
pub mod extract;
pub mod games;
pub mod interests;
pub mod matching;
pub mod profile;
pub mod recommendation;
pub mod router;
pub mod server;
pub mod state;
pub mod video;

#[cfg(test)]
pub(crate) mod test_support;
