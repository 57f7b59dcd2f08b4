//! Shared data model: the to-do item, its wire shape, and its relational row mapping.

pub mod errors;
pub mod db;
pub mod item;
pub mod item_row;

pub use item::{Item, NewItem, Priority};
