//! Value objects - immutable types that represent domain concepts

mod snowflake;
mod subject;

pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use subject::{ReactionAction, ReactionState, SubjectKind, UnknownSubjectKind};
