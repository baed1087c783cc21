//! Entity to model mappers
//!
//! - `From<Model> for Entity`: convert database rows to domain objects
//! - [`ReactionColumns`]: flatten a reaction set into the columns it is stored in

mod comment;
mod reaction;
mod user;
mod video;

pub use comment::reaction_subject;
pub use reaction::{reaction_set, ReactionColumns};
