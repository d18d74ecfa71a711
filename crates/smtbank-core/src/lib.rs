//! Core of the SMT benchmark database: the SQLite-backed catalog, the
//! identity resolver for historical result records, fixup rules, status
//! inference and rating computation.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod extract;
pub mod fixup;
pub mod infer;
pub mod logic;
pub mod model;
pub mod rating;
pub mod registry;
pub mod resolve;
pub mod storage;
