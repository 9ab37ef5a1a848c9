pub mod games;
pub mod interest;
pub mod matching;
pub mod profile;
pub mod user;
