use bitflags::bitflags;

bitflags! {
    /// File descriptor rights, determining which actions may be performed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Rights: u64 {
        /// The right to invoke `fd_datasync`.
        ///
        /// If `PATH_OPEN` is set, includes the right to invoke `path_open`
        /// with `Fdflags::DSYNC`.
        const FD_DATASYNC = 1 << 0;
        /// The right to invoke `fd_read` and `sock_recv`.
        const FD_READ = 1 << 1;
        /// The right to invoke `fd_seek`. This flag implies `FD_TELL`.
        const FD_SEEK = 1 << 2;
        /// The right to invoke `fd_fdstat_set_flags`.
        const FD_FDSTAT_SET_FLAGS = 1 << 3;
        /// The right to invoke `fd_sync`.
        ///
        /// If `PATH_OPEN` is set, includes the right to invoke `path_open`
        /// with `Fdflags::RSYNC` and `Fdflags::DSYNC`.
        const FD_SYNC = 1 << 4;
        /// The right to invoke `fd_seek` in such a way that the file offset
        /// remains unaltered, or to invoke `fd_tell`.
        const FD_TELL = 1 << 5;
        /// The right to invoke `fd_write` and `sock_send`.
        const FD_WRITE = 1 << 6;
        /// The right to invoke `fd_advise`.
        const FD_ADVISE = 1 << 7;
        /// The right to invoke `fd_allocate`.
        const FD_ALLOCATE = 1 << 8;
        /// The right to invoke `path_create_directory`.
        const PATH_CREATE_DIRECTORY = 1 << 9;
        /// If `PATH_OPEN` is set, the right to invoke `path_open` with
        /// `Oflags::CREAT`.
        const PATH_CREATE_FILE = 1 << 10;
        /// The right to invoke `path_link` with the file descriptor as the
        /// source directory.
        const PATH_LINK_SOURCE = 1 << 11;
        /// The right to invoke `path_link` with the file descriptor as the
        /// target directory.
        const PATH_LINK_TARGET = 1 << 12;
        /// The right to invoke `path_open`.
        const PATH_OPEN = 1 << 13;
        /// The right to invoke `fd_readdir`.
        const FD_READDIR = 1 << 14;
        /// The right to invoke `path_readlink`.
        const PATH_READLINK = 1 << 15;
        /// The right to invoke `path_rename` with the file descriptor as the
        /// source directory.
        const PATH_RENAME_SOURCE = 1 << 16;
        /// The right to invoke `path_rename` with the file descriptor as the
        /// target directory.
        const PATH_RENAME_TARGET = 1 << 17;
        /// The right to invoke `path_filestat_get`.
        const PATH_FILESTAT_GET = 1 << 18;
        /// The right to change a file's size.
        ///
        /// If `PATH_OPEN` is set, includes the right to invoke `path_open`
        /// with `Oflags::TRUNC`.
        const PATH_FILESTAT_SET_SIZE = 1 << 19;
        /// The right to invoke `path_filestat_set_times`.
        const PATH_FILESTAT_SET_TIMES = 1 << 20;
        /// The right to invoke `fd_filestat_get`.
        const FD_FILESTAT_GET = 1 << 21;
        /// The right to invoke `fd_filestat_set_size`.
        const FD_FILESTAT_SET_SIZE = 1 << 22;
        /// The right to invoke `fd_filestat_set_times`.
        const FD_FILESTAT_SET_TIMES = 1 << 23;
        /// The right to invoke `path_symlink`.
        const PATH_SYMLINK = 1 << 24;
        /// The right to invoke `path_remove_directory`.
        const PATH_REMOVE_DIRECTORY = 1 << 25;
        /// The right to invoke `path_unlink_file`.
        const PATH_UNLINK_FILE = 1 << 26;
        /// If `FD_READ` is set, includes the right to subscribe to
        /// `eventtype::fd_read` with `poll_oneoff`; likewise for `FD_WRITE`
        /// and `eventtype::fd_write`.
        const POLL_FD_READWRITE = 1 << 27;
        /// The right to invoke `sock_shutdown`.
        const SOCK_SHUTDOWN = 1 << 28;
        /// The right to invoke `sock_accept`.
        const SOCK_ACCEPT = 1 << 29;
        /// The right to invoke `sock_connect`.
        const SOCK_CONNECT = 1 << 30;
        /// The right to invoke `sock_listen`.
        const SOCK_LISTEN = 1 << 31;
        /// The right to invoke `sock_bind`.
        const SOCK_BIND = 1 << 32;
        /// The right to invoke `sock_recv`.
        const SOCK_RECV = 1 << 33;
        /// The right to invoke `sock_send`.
        const SOCK_SEND = 1 << 34;
        /// The right to invoke `sock_addr_local`.
        const SOCK_ADDR_LOCAL = 1 << 35;
        /// The right to invoke `sock_addr_remote`.
        const SOCK_ADDR_REMOTE = 1 << 36;
        /// The right to invoke `sock_recv_from`.
        const SOCK_RECV_FROM = 1 << 37;
        /// The right to invoke `sock_send_to`.
        const SOCK_SEND_TO = 1 << 38;
        /// Extension: the right to invoke `sock_open`.
        const SOCK_OPEN = 1 << 39;
        /// Extension: the right to invoke `sock_close`.
        const SOCK_CLOSE = 1 << 40;
    }
}

#[cfg(feature = "enable-serde")]
crate::serde_bits!(Rights, u64);
