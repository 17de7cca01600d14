//! In-memory primary-key index.

mod avl;

pub use avl::AvlIndex;
