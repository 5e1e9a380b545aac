use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Identifier for a device containing a file system.
pub type Device = u64;
/// File serial number that is unique within its file system.
pub type Inode = u64;
/// Number of hard links to an inode.
pub type Linkcount = u64;
/// Non-negative file size or length of a region within a file.
pub type Filesize = u64;
/// Timestamp in nanoseconds.
pub type Timestamp = u64;

/// The type of a file descriptor or file.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "enable-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Filetype {
    /// The type of the file descriptor or file is unknown or is different
    /// from any of the other types specified.
    #[default]
    Unknown,
    /// The file descriptor or file refers to a block device inode.
    BlockDevice,
    /// The file descriptor or file refers to a character device inode.
    CharacterDevice,
    /// The file descriptor or file refers to a directory inode.
    Directory,
    /// The file descriptor or file refers to a regular file inode.
    RegularFile,
    /// The file descriptor or file refers to a datagram socket.
    SocketDgram,
    /// The file descriptor or file refers to a byte-stream socket.
    SocketStream,
    /// The file refers to a symbolic link inode.
    SymbolicLink,
    /// The file descriptor or file refers to a FIFO.
    Fifo,
}

/// File attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "enable-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Filestat {
    /// Device ID of device containing the file.
    pub st_dev: Device,
    /// File serial number.
    pub st_ino: Inode,
    /// File type.
    pub st_filetype: Filetype,
    /// Number of hard links to the file.
    pub st_nlink: Linkcount,
    /// For regular files, the file size in bytes. For symbolic links, the
    /// length in bytes of the pathname contained in the symbolic link.
    pub st_size: Filesize,
    /// Last data access timestamp.
    pub st_atim: Timestamp,
    /// Last data modification timestamp.
    pub st_mtim: Timestamp,
    /// Last file status change timestamp.
    pub st_ctim: Timestamp,
}

bitflags! {
    /// Flags determining the method of how paths are resolved.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LookupFlags: u32 {
        /// As long as the resolved path corresponds to a symbolic link, it is
        /// expanded.
        const SYMLINK_FOLLOW = 1 << 0;
    }
}

bitflags! {
    /// Open flags used by `path_open`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Oflags: u16 {
        /// Create file if it does not exist.
        const CREAT = 1 << 0;
        /// Fail if not a directory.
        const DIRECTORY = 1 << 1;
        /// Fail if file already exists.
        const EXCL = 1 << 2;
        /// Truncate file to size 0.
        const TRUNC = 1 << 3;
    }
}

bitflags! {
    /// File descriptor flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Fdflags: u16 {
        /// Append mode: data written to the file is always appended to the
        /// file's end.
        const APPEND = 1 << 0;
        /// Write according to synchronized I/O data integrity completion.
        /// Only the data stored in the file is synchronized.
        const DSYNC = 1 << 1;
        /// Non-blocking mode.
        const NONBLOCK = 1 << 2;
        /// Synchronized read I/O operations.
        const RSYNC = 1 << 3;
        /// Write according to synchronized I/O file integrity completion. In
        /// addition to synchronizing the data stored in the file, the
        /// implementation may also synchronously update the file's metadata.
        const SYNC = 1 << 4;
    }
}

bitflags! {
    /// Which file time attributes to adjust.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Fstflags: u16 {
        /// Adjust the last data access timestamp to the value stored in
        /// `Filestat::st_atim`.
        const ATIM = 1 << 0;
        /// Adjust the last data access timestamp to the time of clock
        /// `realtime`.
        const ATIM_NOW = 1 << 1;
        /// Adjust the last data modification timestamp to the value stored in
        /// `Filestat::st_mtim`.
        const MTIM = 1 << 2;
        /// Adjust the last data modification timestamp to the time of clock
        /// `realtime`.
        const MTIM_NOW = 1 << 3;
    }
}

#[cfg(feature = "enable-serde")]
crate::serde_bits!(LookupFlags, u32);
#[cfg(feature = "enable-serde")]
crate::serde_bits!(Oflags, u16);
#[cfg(feature = "enable-serde")]
crate::serde_bits!(Fdflags, u16);
#[cfg(feature = "enable-serde")]
crate::serde_bits!(Fstflags, u16);
