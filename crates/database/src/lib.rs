pub mod basic_db;
