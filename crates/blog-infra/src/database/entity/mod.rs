//! SeaORM entities mirroring `sql/init.sql`.

pub mod comment;
pub mod post;
pub mod user;
