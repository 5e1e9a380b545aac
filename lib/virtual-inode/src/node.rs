use std::any::Any;
use std::fmt;

use bitflags::bitflags;
use wasi_sandbox_types::{
    Addrinfo, AddrinfoHint, Errno, Fdflags, Filestat, Filetype, Fstflags, Oflags, Timestamp,
};

bitflags! {
    /// Read/write intent passed down to the backing when opening a handle.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct AccessMode: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
    }
}

/// A handle to one underlying filesystem entry or socket.
///
/// This is the collaborator contract of the capability layer: every terminal
/// effect of a path operation is delegated to exactly one method of this
/// trait, with a path argument that is a single already-resolved segment
/// relative to the receiving directory handle. Implementations never see a
/// `/`, `.` beyond the self-reference, or `..`.
///
/// Errors are returned as [`Errno`] and propagated verbatim; the layer never
/// retries a failed call.
pub trait Node: fmt::Debug + Send + Sync + 'static + Upcastable {
    /// The type of the entry this handle refers to, fixed at open time.
    fn filetype(&self) -> Filetype;

    /// Open `path` under this directory handle, returning a new handle.
    fn path_open(
        &self,
        path: &str,
        open_flags: Oflags,
        fd_flags: Fdflags,
        access: AccessMode,
    ) -> Result<Box<dyn Node>, Errno>;

    /// Attributes of `path` under this directory handle.
    ///
    /// Must use lstat semantics: when `path` names a symbolic link the
    /// returned filetype is [`Filetype::SymbolicLink`], not the target's.
    /// The resolver depends on this to detect links.
    fn path_filestat_get(&self, path: &str) -> Result<Filestat, Errno>;

    /// Adjust the access/modification timestamps of `path`.
    fn path_filestat_set_times(
        &self,
        path: &str,
        atim: Timestamp,
        mtim: Timestamp,
        fst_flags: Fstflags,
    ) -> Result<(), Errno>;

    /// Create a directory named `path` under this directory handle.
    fn path_create_directory(&self, path: &str) -> Result<(), Errno>;

    /// Remove the empty directory named `path`.
    fn path_remove_directory(&self, path: &str) -> Result<(), Errno>;

    /// Create a hard link at `new_path` under `new_dir` to `old_path` under
    /// this handle.
    fn path_link(&self, old_path: &str, new_dir: &dyn Node, new_path: &str) -> Result<(), Errno>;

    /// Move `old_path` under this handle to `new_path` under `new_dir`.
    fn path_rename(&self, old_path: &str, new_dir: &dyn Node, new_path: &str) -> Result<(), Errno>;

    /// Create a symbolic link at `new_path` whose content is `old_path`.
    /// The link content is stored uninterpreted.
    fn path_symlink(&self, old_path: &str, new_path: &str) -> Result<(), Errno>;

    /// Read the content of the symbolic link named `path` into `buffer`,
    /// returning the number of bytes written.
    fn path_readlink(&self, path: &str, buffer: &mut [u8]) -> Result<usize, Errno>;

    /// Unlink the non-directory entry named `path`.
    fn path_unlink_file(&self, path: &str) -> Result<(), Errno>;

    /// Accept a pending connection on this listening socket handle.
    fn sock_accept(&self, fd_flags: Fdflags) -> Result<Box<dyn Node>, Errno>;

    /// Resolve `node`/`service` to at most `max_results` addresses.
    fn get_addrinfo(
        &self,
        node: &str,
        service: &str,
        hint: &AddrinfoHint,
        max_results: usize,
    ) -> Result<Vec<Addrinfo>, Errno>;
}

/// Trait needed to get downcasting from `Node` to work.
pub trait Upcastable {
    fn upcast_any_ref(&'_ self) -> &'_ dyn Any;
    fn upcast_any_mut(&'_ mut self) -> &'_ mut dyn Any;
    fn upcast_any_box(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + fmt::Debug + 'static> Upcastable for T {
    #[inline]
    fn upcast_any_ref(&'_ self) -> &'_ dyn Any {
        self
    }
    #[inline]
    fn upcast_any_mut(&'_ mut self) -> &'_ mut dyn Any {
        self
    }
    #[inline]
    fn upcast_any_box(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn Node + 'static {
    #[inline]
    pub fn downcast_ref<T: 'static>(&'_ self) -> Option<&'_ T> {
        self.upcast_any_ref().downcast_ref::<T>()
    }
    #[inline]
    pub fn downcast_mut<T: 'static>(&'_ mut self) -> Option<&'_ mut T> {
        self.upcast_any_mut().downcast_mut::<T>()
    }
}
