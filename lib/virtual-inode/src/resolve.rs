//! Contained path resolution.
//!
//! Walks a guest-supplied relative path one segment at a time against a tree
//! of already-opened directory handles, ending with a parent directory and a
//! single literal trailing segment ready for one terminal [`Node`] call.
//!
//! [`Node`]: crate::Node

use std::mem;
use std::sync::Arc;

use tracing::trace;
use wasi_sandbox_types::{Errno, Fdflags, Filetype, LookupFlags, Oflags};

use crate::node::AccessMode;
use crate::vnode::VirtualNode;

/// Upper limit on the number of symbolic links resolution may traverse.
pub const MAX_NESTED_LINKS: u8 = 8;

/// Size of the scratch buffer handed to `path_readlink` while expanding a
/// symbolic link.
const READLINK_BUFFER_SIZE: usize = 16384;

/// The outcome of a successful resolution: the immediate parent directory of
/// the trailing path component, plus that component as a literal segment.
///
/// A segment of `"."` means the parent itself ("this directory"); an empty
/// segment only occurs for an empty path resolved with the empty-path
/// allowance and means "the node behind the handle".
#[derive(Debug)]
pub struct ResolvedPath {
    parent: Arc<VirtualNode>,
    segment: String,
}

impl ResolvedPath {
    /// The directory to hand to the terminal node call.
    pub fn parent(&self) -> &Arc<VirtualNode> {
        &self.parent
    }

    /// The literal trailing path component.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn into_parts(self) -> (Arc<VirtualNode>, String) {
        (self.parent, self.segment)
    }
}

/// Resolve `path` relative to `fd`.
///
/// Empty paths are rejected, symlink chains start at depth zero, and a
/// trailing slash requires the trailing component to be a directory.
pub fn resolve_path(
    fd: Arc<VirtualNode>,
    path: &str,
    lookup_flags: LookupFlags,
) -> Result<ResolvedPath, Errno> {
    resolve_path_with(fd, path, lookup_flags, false, 0, true)
}

/// Full-form resolution.
///
/// The algorithm is a two-level loop. The inner loop consumes one segment per
/// iteration, descending through directories on the fast path: each opened
/// intermediate directory becomes the current node and the previous one is
/// pushed on an ancestor stack, so `..` is a pop and never re-walks from the
/// root. Popping an empty stack means the path tried to ascend past the
/// binding root and fails with `Errno::Perm`; this check is the containment
/// boundary of the sandbox. When a segment turns out to be a symbolic link,
/// the link target replaces the working path (with the unconsumed remainder
/// appended) and the outer loop restarts against the directory the link
/// lives in; only this slow path consumes link depth.
pub(crate) fn resolve_path_with(
    mut fd: Arc<VirtualNode>,
    path: &str,
    lookup_flags: LookupFlags,
    allow_empty: bool,
    mut link_depth: u8,
    follow_trailing_slashes: bool,
) -> Result<ResolvedPath, Errno> {
    let mut ancestors: Vec<Arc<VirtualNode>> = Vec::new();
    let mut path = path.to_owned();
    loop {
        if path.is_empty() && !allow_empty {
            return Err(Errno::Noent);
        }

        // Only root-relative paths are accepted; an absolute path is a
        // containment violation, not something to reinterpret.
        if path.starts_with('/') {
            return Err(Errno::Perm);
        }

        if !fd.is_directory() {
            return Err(Errno::Notdir);
        }
        if !fd.can_browse() {
            return Err(Errno::Access);
        }

        loop {
            let slash = path.find('/');
            let part_end = slash.unwrap_or(path.len());
            let part = &path[..part_end];
            let mut rest = part_end;
            while path[rest..].starts_with('/') {
                rest += 1;
            }
            let last_part =
                rest == path.len() && (!follow_trailing_slashes || slash.is_none());

            if part == "." {
                if last_part {
                    return Ok(ResolvedPath {
                        parent: fd,
                        segment: ".".to_owned(),
                    });
                }
                path.drain(..rest);
                continue;
            }
            if part == ".." {
                // The containment invariant: ascending with nothing left on
                // the ancestor stack would leave the binding root.
                let Some(parent) = ancestors.pop() else {
                    trace!("refusing to ascend past the binding root");
                    return Err(Errno::Perm);
                };
                fd = parent;
                if last_part {
                    return Ok(ResolvedPath {
                        parent: fd,
                        segment: ".".to_owned(),
                    });
                }
                path.drain(..rest);
                continue;
            }

            if last_part && !lookup_flags.contains(LookupFlags::SYMLINK_FOLLOW) {
                // The terminal operation owns symlink semantics for its
                // trailing component (unlink and readlink act on the link).
                let segment = part.to_owned();
                return Ok(ResolvedPath {
                    parent: fd,
                    segment,
                });
            }

            let stat = match fd.node().path_filestat_get(part) {
                Ok(stat) => stat,
                Err(errno) => {
                    if last_part {
                        // A missing trailing component is not a resolution
                        // failure: create-on-open needs the literal name.
                        let segment = part.to_owned();
                        return Ok(ResolvedPath {
                            parent: fd,
                            segment,
                        });
                    }
                    return Err(errno);
                }
            };

            if stat.st_filetype == Filetype::SymbolicLink {
                link_depth += 1;
                if link_depth >= MAX_NESTED_LINKS {
                    return Err(Errno::Loop);
                }
                let mut buffer = vec![0u8; READLINK_BUFFER_SIZE];
                let nread = fd.node().path_readlink(part, &mut buffer)?;
                buffer.truncate(nread);
                let mut target = String::from_utf8(buffer).map_err(|_| Errno::Ilseq)?;
                let remainder = &path[rest..];
                if !remainder.is_empty() {
                    if !target.ends_with('/') {
                        target.push('/');
                    }
                    target.push_str(remainder);
                }
                trace!(link_target = %target, depth = link_depth, "expanding symbolic link");
                // Slow path: restart against the directory the link lives in.
                path = target;
                break;
            }

            if last_part {
                let segment = part.to_owned();
                return Ok(ResolvedPath {
                    parent: fd,
                    segment,
                });
            }

            if stat.st_filetype != Filetype::Directory {
                return Err(Errno::Notdir);
            }

            // Fast path: descend without re-resolving from the root.
            // Intermediate traversal does not narrow rights.
            let child = fd.node().path_open(
                part,
                Oflags::DIRECTORY,
                Fdflags::empty(),
                AccessMode::empty(),
            )?;
            let child = Arc::new(VirtualNode::new(
                child,
                fd.rights_base(),
                fd.rights_inheriting(),
                String::new(),
            ));
            ancestors.push(mem::replace(&mut fd, child));
            path.drain(..rest);
            if path.is_empty() {
                return Ok(ResolvedPath {
                    parent: fd,
                    segment: ".".to_owned(),
                });
            }
        }
    }
}
