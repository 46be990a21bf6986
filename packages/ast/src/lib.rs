pub mod attr;
pub mod block;
pub mod node;
pub mod visitor;
pub mod walk;

pub use attr::Attr;
pub use block::{Block, KNOWN_TAGS};
pub use node::{
    blocks, content_of, is_node, make_node, stringify, take_blocks, type_of, CONTENT_KEY,
    TYPE_KEY,
};
pub use visitor::{filter_nodes, visit, Visitor};
pub use walk::{walk, walk_array, walk_value};
