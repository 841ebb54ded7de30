pub use super::task::Entity as Task;
pub use super::user_profile::Entity as UserProfile;
