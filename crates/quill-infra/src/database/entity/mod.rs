//! SeaORM entities mirroring the domain model, with the cascade and
//! nullify rules declared on the relations.

pub mod comment;
pub mod follow;
pub mod group;
pub mod post;
pub mod user;
