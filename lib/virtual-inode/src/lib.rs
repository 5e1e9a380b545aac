//! Sandboxed virtual-inode layer for a WASM host runtime.
//!
//! Every path-based filesystem operation a guest issues goes through this
//! crate: a [`VirtualNode`] pairs an opened backing handle with the
//! capability rights the guest holds on it, and [`resolve_path`] walks a
//! guest-supplied relative path against a tree of such handles, one segment
//! at a time, following symbolic links up to a fixed depth. Two invariants
//! hold for every operation:
//!
//! - a handle can only perform operations its rights bitmask grants, checked
//!   before any backing call is made;
//! - no segment sequence, symlink expansion included, can ascend past the
//!   directory the guest was bound to.
//!
//! The actual filesystem and socket effects live behind the [`Node`] trait;
//! this crate decides only *whether* and *where* they happen.

mod node;
mod path;
mod resolve;
mod vnode;

pub use node::{AccessMode, Node, Upcastable};
pub use path::canonical_guest;
pub use resolve::{MAX_NESTED_LINKS, ResolvedPath, resolve_path};
pub use vnode::{
    SOCK_ACCEPT_DEFAULT_RIGHTS, SOCK_OPEN_DEFAULT_RIGHTS, STDERR_DEFAULT_RIGHTS,
    STDIN_DEFAULT_RIGHTS, STDOUT_DEFAULT_RIGHTS, VirtualNode,
};

pub use wasi_sandbox_types as types;
