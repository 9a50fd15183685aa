pub mod error;
pub mod gloss;
pub mod migration;
pub mod quiz;
pub mod sql;
