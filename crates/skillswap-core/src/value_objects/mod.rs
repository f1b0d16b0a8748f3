//! Value objects for the domain layer

mod room;
mod snowflake;
mod time_of_day;

pub use room::room_id;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use time_of_day::{TimeOfDay, TimeOfDayParseError, SESSION_MINUTES};
