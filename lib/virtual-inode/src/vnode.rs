use std::sync::Arc;

use tracing::{instrument, trace};
use wasi_sandbox_types::{
    Addrinfo, AddrinfoHint, Errno, Fdflags, Filestat, Filetype, Fstflags, LookupFlags, Oflags,
    Rights, Timestamp,
};

use crate::node::{AccessMode, Node};
use crate::resolve::{resolve_path, resolve_path_with};

/// Rights granted to a standard input stream by default.
pub const STDIN_DEFAULT_RIGHTS: Rights = Rights::FD_DATASYNC
    .union(Rights::FD_READ)
    .union(Rights::FD_SYNC)
    .union(Rights::FD_ADVISE)
    .union(Rights::FD_FILESTAT_GET)
    .union(Rights::POLL_FD_READWRITE);

/// Rights granted to a standard output stream by default.
pub const STDOUT_DEFAULT_RIGHTS: Rights = Rights::FD_DATASYNC
    .union(Rights::FD_WRITE)
    .union(Rights::FD_SYNC)
    .union(Rights::FD_ADVISE)
    .union(Rights::FD_FILESTAT_GET)
    .union(Rights::POLL_FD_READWRITE);

/// Rights granted to a standard error stream by default.
pub const STDERR_DEFAULT_RIGHTS: Rights = STDOUT_DEFAULT_RIGHTS;

/// Rights mask applied to a freshly opened socket.
pub const SOCK_OPEN_DEFAULT_RIGHTS: Rights = Rights::SOCK_OPEN
    .union(Rights::SOCK_CLOSE)
    .union(Rights::SOCK_RECV)
    .union(Rights::SOCK_RECV_FROM)
    .union(Rights::SOCK_SEND)
    .union(Rights::SOCK_SEND_TO)
    .union(Rights::SOCK_SHUTDOWN)
    .union(Rights::SOCK_BIND)
    .union(Rights::POLL_FD_READWRITE)
    .union(Rights::FD_FDSTAT_SET_FLAGS)
    .union(Rights::FD_READ)
    .union(Rights::FD_WRITE);

/// Rights mask applied to a socket produced by `sock_accept`. An accepted
/// connection cannot be re-bound or re-opened.
pub const SOCK_ACCEPT_DEFAULT_RIGHTS: Rights = Rights::SOCK_RECV
    .union(Rights::SOCK_RECV_FROM)
    .union(Rights::SOCK_SEND)
    .union(Rights::SOCK_SEND_TO)
    .union(Rights::SOCK_SHUTDOWN)
    .union(Rights::POLL_FD_READWRITE)
    .union(Rights::FD_FDSTAT_SET_FLAGS)
    .union(Rights::FD_READ)
    .union(Rights::FD_WRITE);

/// One filesystem entry or socket as exposed to the guest.
///
/// A `VirtualNode` pairs an owned [`Node`] handle with the capability rights
/// the guest holds on it and a display name used for canonical-path
/// bookkeeping. Rights are immutable after construction; a narrower handle is
/// always a new `VirtualNode`. Nodes are shared as `Arc` between the guest's
/// descriptor table and any in-flight resolution; dropping the last reference
/// releases the underlying handle.
///
/// The path operations are associated functions taking the acting node(s) as
/// `&Arc<Self>` so resolution can retain and advance shared references. Each
/// follows the same contract: verify the exact rights the operation needs,
/// resolve every path argument, delegate the terminal step to the backing.
#[derive(Debug)]
pub struct VirtualNode {
    node: Box<dyn Node>,
    rights_base: Rights,
    rights_inheriting: Rights,
    name: String,
}

impl VirtualNode {
    pub fn new(
        node: Box<dyn Node>,
        rights_base: Rights,
        rights_inheriting: Rights,
        name: String,
    ) -> Self {
        Self {
            node,
            rights_base,
            rights_inheriting,
            name,
        }
    }

    /// Wrap the guest's standard input stream.
    pub fn stdin(
        node: Box<dyn Node>,
        rights_base: Rights,
        rights_inheriting: Rights,
    ) -> Arc<Self> {
        Arc::new(Self::new(node, rights_base, rights_inheriting, String::new()))
    }

    /// Wrap the guest's standard output stream.
    pub fn stdout(
        node: Box<dyn Node>,
        rights_base: Rights,
        rights_inheriting: Rights,
    ) -> Arc<Self> {
        Arc::new(Self::new(node, rights_base, rights_inheriting, String::new()))
    }

    /// Wrap the guest's standard error stream.
    pub fn stderr(
        node: Box<dyn Node>,
        rights_base: Rights,
        rights_inheriting: Rights,
    ) -> Arc<Self> {
        Arc::new(Self::new(node, rights_base, rights_inheriting, String::new()))
    }

    /// Preopen a host directory under the guest-visible `name`.
    ///
    /// `node` must be an opened directory handle; everything the guest can
    /// ever reach through this preopen is resolved relative to it.
    pub fn bind(
        node: Box<dyn Node>,
        rights_base: Rights,
        rights_inheriting: Rights,
        name: String,
    ) -> Result<Arc<Self>, Errno> {
        if node.filetype() != Filetype::Directory {
            return Err(Errno::Notdir);
        }
        Ok(Arc::new(Self::new(node, rights_base, rights_inheriting, name)))
    }

    /// Wrap a freshly created socket with the fixed socket rights mask.
    ///
    /// Sockets are not path-addressed; no resolution is involved.
    pub fn sock_open(node: Box<dyn Node>) -> Arc<Self> {
        Arc::new(Self::new(
            node,
            SOCK_OPEN_DEFAULT_RIGHTS,
            SOCK_OPEN_DEFAULT_RIGHTS,
            String::new(),
        ))
    }

    /// Accept a pending connection on this listening socket.
    pub fn sock_accept(&self, fd_flags: Fdflags) -> Result<Arc<Self>, Errno> {
        let node = self.node.sock_accept(fd_flags)?;
        Ok(Arc::new(Self::new(
            node,
            SOCK_ACCEPT_DEFAULT_RIGHTS,
            SOCK_ACCEPT_DEFAULT_RIGHTS,
            String::new(),
        )))
    }

    /// Resolve host names to socket addresses. Plain passthrough; address
    /// resolution is not subject to filesystem capability rights.
    pub fn get_addrinfo(
        &self,
        node: &str,
        service: &str,
        hint: &AddrinfoHint,
        max_results: usize,
    ) -> Result<Vec<Addrinfo>, Errno> {
        self.node.get_addrinfo(node, service, hint, max_results)
    }

    pub fn rights_base(&self) -> Rights {
        self.rights_base
    }

    pub fn rights_inheriting(&self) -> Rights {
        self.rights_inheriting
    }

    /// The display name given at preopen time; empty for derived handles.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn node(&self) -> &dyn Node {
        &*self.node
    }

    pub fn is_directory(&self) -> bool {
        self.node.filetype() == Filetype::Directory
    }

    /// Whether the base rights cover `required`.
    pub fn can(&self, required: Rights) -> bool {
        self.rights_base.contains(required)
    }

    /// Whether the base rights cover `required` and the inheriting rights
    /// cover `required_inheriting`.
    pub fn can_with_inheriting(&self, required: Rights, required_inheriting: Rights) -> bool {
        self.rights_base.contains(required)
            && self.rights_inheriting.contains(required_inheriting)
    }

    /// Whether this directory may be descended through during resolution.
    pub fn can_browse(&self) -> bool {
        self.rights_base.contains(Rights::FD_READ)
    }

    /// Create a directory at `path` under `fd`.
    #[instrument(level = "trace", skip_all, fields(path = %path), ret)]
    pub fn path_create_directory(fd: &Arc<Self>, path: &str) -> Result<(), Errno> {
        if !fd.can(Rights::PATH_CREATE_DIRECTORY) {
            return Err(Errno::Notcapable);
        }
        let resolved = resolve_path(fd.clone(), path, LookupFlags::empty())?;
        resolved
            .parent()
            .node()
            .path_create_directory(resolved.segment())
    }

    /// Attributes of the entry at `path` under `fd`.
    #[instrument(level = "trace", skip_all, fields(path = %path), ret)]
    pub fn path_filestat_get(
        fd: &Arc<Self>,
        path: &str,
        flags: LookupFlags,
    ) -> Result<Filestat, Errno> {
        if !fd.can(Rights::PATH_FILESTAT_GET) {
            return Err(Errno::Notcapable);
        }
        let resolved = resolve_path(fd.clone(), path, flags)?;
        resolved.parent().node().path_filestat_get(resolved.segment())
    }

    /// Adjust the timestamps of the entry at `path` under `fd`.
    #[instrument(level = "trace", skip_all, fields(path = %path), ret)]
    pub fn path_filestat_set_times(
        fd: &Arc<Self>,
        path: &str,
        flags: LookupFlags,
        atim: Timestamp,
        mtim: Timestamp,
        fst_flags: Fstflags,
    ) -> Result<(), Errno> {
        if !fd.can(Rights::PATH_FILESTAT_SET_TIMES) {
            return Err(Errno::Notcapable);
        }
        let resolved = resolve_path(fd.clone(), path, flags)?;
        resolved
            .parent()
            .node()
            .path_filestat_set_times(resolved.segment(), atim, mtim, fst_flags)
    }

    /// Create a hard link at `new_path` under `new` to `old_path` under
    /// `old`. The source side needs `PATH_LINK_SOURCE`, the target side
    /// `PATH_LINK_TARGET`.
    #[instrument(level = "trace", skip_all, fields(old_path = %old_path, new_path = %new_path), ret)]
    pub fn path_link(
        old: &Arc<Self>,
        old_path: &str,
        new: Option<&Arc<Self>>,
        new_path: &str,
        lookup_flags: LookupFlags,
    ) -> Result<(), Errno> {
        let Some(new) = new else {
            return Err(Errno::Badf);
        };
        if !old.can(Rights::PATH_LINK_SOURCE) {
            return Err(Errno::Notcapable);
        }
        if !new.can(Rights::PATH_LINK_TARGET) {
            return Err(Errno::Notcapable);
        }
        let old_resolved = resolve_path(old.clone(), old_path, lookup_flags)?;
        let new_resolved = resolve_path(new.clone(), new_path, lookup_flags)?;
        old_resolved.parent().node().path_link(
            old_resolved.segment(),
            new_resolved.parent().node(),
            new_resolved.segment(),
        )
    }

    /// Open the entry at `path` under `fd`, deriving the rights granted to
    /// the new handle from the requested masks and open flags.
    ///
    /// Directory opens drop the seek right; non-directory opens drop the
    /// path-filestat-get right from both masks. The create and truncate
    /// flags enlarge the rights *checked* on `fd`, not the rights granted to
    /// the new handle. The granted base rights decide the read/write intent
    /// handed to the backing.
    #[instrument(level = "trace", skip_all, fields(path = %path), ret)]
    pub fn path_open(
        fd: &Arc<Self>,
        path: &str,
        lookup_flags: LookupFlags,
        open_flags: Oflags,
        mut rights_base: Rights,
        mut rights_inheriting: Rights,
        fd_flags: Fdflags,
    ) -> Result<Arc<Self>, Errno> {
        if open_flags.contains(Oflags::DIRECTORY) {
            rights_base.remove(Rights::FD_SEEK);
        } else {
            rights_base.remove(Rights::PATH_FILESTAT_GET);
            rights_inheriting.remove(Rights::PATH_FILESTAT_GET);
        }

        let mut required_rights = Rights::PATH_OPEN;
        let mut required_inheriting_rights = rights_base | rights_inheriting;
        let read = rights_base.intersects(Rights::FD_READ | Rights::FD_READDIR);
        let write = rights_base.intersects(
            Rights::FD_DATASYNC
                | Rights::FD_WRITE
                | Rights::FD_ALLOCATE
                | Rights::FD_FILESTAT_SET_SIZE,
        );

        if open_flags.contains(Oflags::CREAT) {
            required_rights |= Rights::PATH_CREATE_FILE;
        }
        if open_flags.contains(Oflags::TRUNC) {
            required_rights |= Rights::PATH_FILESTAT_SET_SIZE;
        }
        if fd_flags.contains(Fdflags::RSYNC) {
            required_inheriting_rights |= Rights::FD_SYNC;
        }
        if fd_flags.contains(Fdflags::DSYNC) {
            required_inheriting_rights |= Rights::FD_DATASYNC;
        }

        if !fd.can_with_inheriting(required_rights, required_inheriting_rights) {
            trace!("requested masks exceed the rights held on this handle");
            return Err(Errno::Notcapable);
        }

        // An empty path is allowed here and means the node itself.
        let resolved = resolve_path_with(fd.clone(), path, lookup_flags, true, 0, true)?;

        let mut access = AccessMode::empty();
        if read {
            access |= AccessMode::READ;
        }
        if write {
            access |= AccessMode::WRITE;
        }
        resolved.parent().direct_open(
            resolved.segment(),
            open_flags,
            fd_flags,
            access,
            rights_base,
            rights_inheriting,
        )
    }

    /// Read the content of the symbolic link at `path` under `fd` into
    /// `buffer`, returning the number of bytes written. Acts on the link
    /// itself.
    #[instrument(level = "trace", skip_all, fields(path = %path), ret)]
    pub fn path_readlink(
        fd: &Arc<Self>,
        path: &str,
        buffer: &mut [u8],
    ) -> Result<usize, Errno> {
        if !fd.can(Rights::PATH_READLINK) {
            return Err(Errno::Notcapable);
        }
        let resolved = resolve_path(fd.clone(), path, LookupFlags::empty())?;
        resolved
            .parent()
            .node()
            .path_readlink(resolved.segment(), buffer)
    }

    /// Remove the empty directory at `path` under `fd`.
    #[instrument(level = "trace", skip_all, fields(path = %path), ret)]
    pub fn path_remove_directory(fd: &Arc<Self>, path: &str) -> Result<(), Errno> {
        if !fd.can(Rights::PATH_REMOVE_DIRECTORY) {
            return Err(Errno::Notcapable);
        }
        let resolved = resolve_path(fd.clone(), path, LookupFlags::empty())?;
        resolved
            .parent()
            .node()
            .path_remove_directory(resolved.segment())
    }

    /// Move `old_path` under `old` to `new_path` under `new`. The source
    /// side needs `PATH_RENAME_SOURCE`, the target side `PATH_RENAME_TARGET`.
    #[instrument(level = "trace", skip_all, fields(old_path = %old_path, new_path = %new_path), ret)]
    pub fn path_rename(
        old: &Arc<Self>,
        old_path: &str,
        new: &Arc<Self>,
        new_path: &str,
    ) -> Result<(), Errno> {
        if !old.can(Rights::PATH_RENAME_SOURCE) {
            return Err(Errno::Notcapable);
        }
        if !new.can(Rights::PATH_RENAME_TARGET) {
            return Err(Errno::Notcapable);
        }
        let old_resolved = resolve_path(old.clone(), old_path, LookupFlags::empty())?;
        let new_resolved = resolve_path(new.clone(), new_path, LookupFlags::empty())?;
        old_resolved.parent().node().path_rename(
            old_resolved.segment(),
            new_resolved.parent().node(),
            new_resolved.segment(),
        )
    }

    /// Create a symbolic link at `new_path` under `new` whose content is
    /// `old_path`. The link content is stored uninterpreted; it is checked
    /// against the sandbox when later resolved, not when created.
    #[instrument(level = "trace", skip_all, fields(old_path = %old_path, new_path = %new_path), ret)]
    pub fn path_symlink(
        old_path: &str,
        new: Option<&Arc<Self>>,
        new_path: &str,
    ) -> Result<(), Errno> {
        let Some(new) = new else {
            return Err(Errno::Badf);
        };
        if !new.can(Rights::PATH_SYMLINK) {
            return Err(Errno::Notcapable);
        }
        let new_resolved = resolve_path(new.clone(), new_path, LookupFlags::SYMLINK_FOLLOW)?;
        new_resolved
            .parent()
            .node()
            .path_symlink(old_path, new_resolved.segment())
    }

    /// Unlink the non-directory entry at `path` under `fd`. Acts on a
    /// trailing symbolic link itself, never its target.
    #[instrument(level = "trace", skip_all, fields(path = %path), ret)]
    pub fn path_unlink_file(fd: &Arc<Self>, path: &str) -> Result<(), Errno> {
        if !fd.can(Rights::PATH_UNLINK_FILE) {
            return Err(Errno::Notcapable);
        }
        let resolved = resolve_path(fd.clone(), path, LookupFlags::empty())?;
        resolved
            .parent()
            .node()
            .path_unlink_file(resolved.segment())
    }

    fn direct_open(
        &self,
        path: &str,
        open_flags: Oflags,
        fd_flags: Fdflags,
        access: AccessMode,
        rights_base: Rights,
        rights_inheriting: Rights,
    ) -> Result<Arc<Self>, Errno> {
        let node = self.node.path_open(path, open_flags, fd_flags, access)?;
        Ok(Arc::new(Self::new(
            node,
            rights_base,
            rights_inheriting,
            String::new(),
        )))
    }
}
