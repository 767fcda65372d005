#![cfg_attr(feature = "clippy", feature(plugin))]
#![cfg_attr(feature = "clippy", plugin(clippy))]

extern crate compare;

mod entry;
mod node;
mod tree;
pub mod arena;
pub mod map;
pub mod set;

pub use self::map::TreeMap;
pub use self::set::TreeSet;
pub use self::tree::Position;
