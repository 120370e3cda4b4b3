//! Sea-ORM entities shared by the store, item, tag and user domains.
//!
//! The tables are owned by the `migration` crate; these models only map them.
//! Stores own items and tags, and items and tags are linked many-to-many
//! through `items_tags`.

pub mod item;
pub mod item_tag;
pub mod plain;
pub mod store;
pub mod tag;
pub mod user;

pub use plain::{PlainItem, PlainStore, PlainTag};

pub mod prelude {
    pub use super::item::Entity as Item;
    pub use super::item_tag::Entity as ItemTag;
    pub use super::store::Entity as Store;
    pub use super::tag::Entity as Tag;
    pub use super::user::Entity as User;
}
