pub mod prelude;

pub mod task;
pub mod user_profile;
