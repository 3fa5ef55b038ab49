mod arena;
mod handle;
mod node;
mod raw_avlg_tree;

pub(crate) use handle::Handle;
pub(crate) use raw_avlg_tree::RawAvlgTree;
