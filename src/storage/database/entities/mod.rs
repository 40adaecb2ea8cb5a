/// Generation history entity module
pub mod history_item;
/// User entity module
pub mod user;

pub use history_item::Entity as HistoryItem;
pub use user::Entity as User;
