use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

/// Error codes returned by functions.
///
/// Not all of these error codes are returned by the functions provided by this
/// API; some are used in higher-level library layers, and others are provided
/// merely for alignment with POSIX.
#[repr(u16)]
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "enable-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Errno {
    /// No error occurred. System call completed successfully.
    #[error("No error occurred. System call completed successfully.")]
    Success,
    /// Argument list too long.
    #[error("Argument list too long.")]
    Toobig,
    /// Permission denied.
    #[error("Permission denied.")]
    Access,
    /// Address in use.
    #[error("Address in use.")]
    Addrinuse,
    /// Address not available.
    #[error("Address not available.")]
    Addrnotavail,
    /// Address family not supported.
    #[error("Address family not supported.")]
    Afnosupport,
    /// Resource unavailable, or operation would block.
    #[error("Resource unavailable, or operation would block.")]
    Again,
    /// Connection already in progress.
    #[error("Connection already in progress.")]
    Already,
    /// Bad file descriptor.
    #[error("Bad file descriptor.")]
    Badf,
    /// Bad message.
    #[error("Bad message.")]
    Badmsg,
    /// Device or resource busy.
    #[error("Device or resource busy.")]
    Busy,
    /// Operation canceled.
    #[error("Operation canceled.")]
    Canceled,
    /// No child processes.
    #[error("No child processes.")]
    Child,
    /// Connection aborted.
    #[error("Connection aborted.")]
    Connaborted,
    /// Connection refused.
    #[error("Connection refused.")]
    Connrefused,
    /// Connection reset.
    #[error("Connection reset.")]
    Connreset,
    /// Resource deadlock would occur.
    #[error("Resource deadlock would occur.")]
    Deadlk,
    /// Destination address required.
    #[error("Destination address required.")]
    Destaddrreq,
    /// Mathematics argument out of domain of function.
    #[error("Mathematics argument out of domain of function.")]
    Dom,
    /// Reserved.
    #[error("Reserved.")]
    Dquot,
    /// File exists.
    #[error("File exists.")]
    Exist,
    /// Bad address.
    #[error("Bad address.")]
    Fault,
    /// File too large.
    #[error("File too large.")]
    Fbig,
    /// Host is unreachable.
    #[error("Host is unreachable.")]
    Hostunreach,
    /// Identifier removed.
    #[error("Identifier removed.")]
    Idrm,
    /// Illegal byte sequence.
    #[error("Illegal byte sequence.")]
    Ilseq,
    /// Operation in progress.
    #[error("Operation in progress.")]
    Inprogress,
    /// Interrupted function.
    #[error("Interrupted function.")]
    Intr,
    /// Invalid argument.
    #[error("Invalid argument.")]
    Inval,
    /// I/O error.
    #[error("I/O error.")]
    Io,
    /// Socket is connected.
    #[error("Socket is connected.")]
    Isconn,
    /// Is a directory.
    #[error("Is a directory.")]
    Isdir,
    /// Too many levels of symbolic links.
    #[error("Too many levels of symbolic links.")]
    Loop,
    /// File descriptor value too large.
    #[error("File descriptor value too large.")]
    Mfile,
    /// Too many links.
    #[error("Too many links.")]
    Mlink,
    /// Message too large.
    #[error("Message too large.")]
    Msgsize,
    /// Reserved.
    #[error("Reserved.")]
    Multihop,
    /// Filename too long.
    #[error("Filename too long.")]
    Nametoolong,
    /// Network is down.
    #[error("Network is down.")]
    Netdown,
    /// Connection aborted by network.
    #[error("Connection aborted by network.")]
    Netreset,
    /// Network unreachable.
    #[error("Network unreachable.")]
    Netunreach,
    /// Too many files open in system.
    #[error("Too many files open in system.")]
    Nfile,
    /// No buffer space available.
    #[error("No buffer space available.")]
    Nobufs,
    /// No such device.
    #[error("No such device.")]
    Nodev,
    /// No such file or directory.
    #[error("No such file or directory.")]
    Noent,
    /// Executable file format error.
    #[error("Executable file format error.")]
    Noexec,
    /// No locks available.
    #[error("No locks available.")]
    Nolck,
    /// Reserved.
    #[error("Reserved.")]
    Nolink,
    /// Not enough space.
    #[error("Not enough space.")]
    Nomem,
    /// No message of the desired type.
    #[error("No message of the desired type.")]
    Nomsg,
    /// Protocol not available.
    #[error("Protocol not available.")]
    Noprotoopt,
    /// No space left on device.
    #[error("No space left on device.")]
    Nospc,
    /// Function not supported.
    #[error("Function not supported.")]
    Nosys,
    /// The socket is not connected.
    #[error("The socket is not connected.")]
    Notconn,
    /// Not a directory or a symbolic link to a directory.
    #[error("Not a directory or a symbolic link to a directory.")]
    Notdir,
    /// Directory not empty.
    #[error("Directory not empty.")]
    Notempty,
    /// State not recoverable.
    #[error("State not recoverable.")]
    Notrecoverable,
    /// Not a socket.
    #[error("Not a socket.")]
    Notsock,
    /// Not supported, or operation not supported on socket.
    #[error("Not supported, or operation not supported on socket.")]
    Notsup,
    /// Inappropriate I/O control operation.
    #[error("Inappropriate I/O control operation.")]
    Notty,
    /// No such device or address.
    #[error("No such device or address.")]
    Nxio,
    /// Value too large to be stored in data type.
    #[error("Value too large to be stored in data type.")]
    Overflow,
    /// Previous owner died.
    #[error("Previous owner died.")]
    Ownerdead,
    /// Operation not permitted.
    #[error("Operation not permitted.")]
    Perm,
    /// Broken pipe.
    #[error("Broken pipe.")]
    Pipe,
    /// Protocol error.
    #[error("Protocol error.")]
    Proto,
    /// Protocol not supported.
    #[error("Protocol not supported.")]
    Protonosupport,
    /// Protocol wrong type for socket.
    #[error("Protocol wrong type for socket.")]
    Prototype,
    /// Result too large.
    #[error("Result too large.")]
    Range,
    /// Read-only file system.
    #[error("Read-only file system.")]
    Rofs,
    /// Invalid seek.
    #[error("Invalid seek.")]
    Spipe,
    /// No such process.
    #[error("No such process.")]
    Srch,
    /// Reserved.
    #[error("Reserved.")]
    Stale,
    /// Connection timed out.
    #[error("Connection timed out.")]
    Timedout,
    /// Text file busy.
    #[error("Text file busy.")]
    Txtbsy,
    /// Cross-device link.
    #[error("Cross-device link.")]
    Xdev,
    /// Extension: Capabilities insufficient.
    #[error("Extension: Capabilities insufficient.")]
    Notcapable,
}

impl Errno {
    /// The lowercase WASI identifier of this error code.
    pub fn name(self) -> &'static str {
        match self {
            Errno::Success => "success",
            Errno::Toobig => "toobig",
            Errno::Access => "access",
            Errno::Addrinuse => "addrinuse",
            Errno::Addrnotavail => "addrnotavail",
            Errno::Afnosupport => "afnosupport",
            Errno::Again => "again",
            Errno::Already => "already",
            Errno::Badf => "badf",
            Errno::Badmsg => "badmsg",
            Errno::Busy => "busy",
            Errno::Canceled => "canceled",
            Errno::Child => "child",
            Errno::Connaborted => "connaborted",
            Errno::Connrefused => "connrefused",
            Errno::Connreset => "connreset",
            Errno::Deadlk => "deadlk",
            Errno::Destaddrreq => "destaddrreq",
            Errno::Dom => "dom",
            Errno::Dquot => "dquot",
            Errno::Exist => "exist",
            Errno::Fault => "fault",
            Errno::Fbig => "fbig",
            Errno::Hostunreach => "hostunreach",
            Errno::Idrm => "idrm",
            Errno::Ilseq => "ilseq",
            Errno::Inprogress => "inprogress",
            Errno::Intr => "intr",
            Errno::Inval => "inval",
            Errno::Io => "io",
            Errno::Isconn => "isconn",
            Errno::Isdir => "isdir",
            Errno::Loop => "loop",
            Errno::Mfile => "mfile",
            Errno::Mlink => "mlink",
            Errno::Msgsize => "msgsize",
            Errno::Multihop => "multihop",
            Errno::Nametoolong => "nametoolong",
            Errno::Netdown => "netdown",
            Errno::Netreset => "netreset",
            Errno::Netunreach => "netunreach",
            Errno::Nfile => "nfile",
            Errno::Nobufs => "nobufs",
            Errno::Nodev => "nodev",
            Errno::Noent => "noent",
            Errno::Noexec => "noexec",
            Errno::Nolck => "nolck",
            Errno::Nolink => "nolink",
            Errno::Nomem => "nomem",
            Errno::Nomsg => "nomsg",
            Errno::Noprotoopt => "noprotoopt",
            Errno::Nospc => "nospc",
            Errno::Nosys => "nosys",
            Errno::Notconn => "notconn",
            Errno::Notdir => "notdir",
            Errno::Notempty => "notempty",
            Errno::Notrecoverable => "notrecoverable",
            Errno::Notsock => "notsock",
            Errno::Notsup => "notsup",
            Errno::Notty => "notty",
            Errno::Nxio => "nxio",
            Errno::Overflow => "overflow",
            Errno::Ownerdead => "ownerdead",
            Errno::Perm => "perm",
            Errno::Pipe => "pipe",
            Errno::Proto => "proto",
            Errno::Protonosupport => "protonosupport",
            Errno::Prototype => "prototype",
            Errno::Range => "range",
            Errno::Rofs => "rofs",
            Errno::Spipe => "spipe",
            Errno::Srch => "srch",
            Errno::Stale => "stale",
            Errno::Timedout => "timedout",
            Errno::Txtbsy => "txtbsy",
            Errno::Xdev => "xdev",
            Errno::Notcapable => "notcapable",
        }
    }

    /// Whether this code reports success rather than a failure.
    pub fn is_success(self) -> bool {
        self == Errno::Success
    }
}

impl From<std::io::Error> for Errno {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::AddrInUse => Errno::Addrinuse,
            ErrorKind::AddrNotAvailable => Errno::Addrnotavail,
            ErrorKind::AlreadyExists => Errno::Exist,
            ErrorKind::BrokenPipe => Errno::Pipe,
            ErrorKind::ConnectionAborted => Errno::Connaborted,
            ErrorKind::ConnectionRefused => Errno::Connrefused,
            ErrorKind::ConnectionReset => Errno::Connreset,
            ErrorKind::Interrupted => Errno::Intr,
            ErrorKind::InvalidData => Errno::Io,
            ErrorKind::InvalidInput => Errno::Inval,
            ErrorKind::NotConnected => Errno::Notconn,
            ErrorKind::NotFound => Errno::Noent,
            ErrorKind::PermissionDenied => Errno::Access,
            ErrorKind::TimedOut => Errno::Timedout,
            ErrorKind::UnexpectedEof => Errno::Io,
            ErrorKind::WouldBlock => Errno::Again,
            ErrorKind::WriteZero => Errno::Io,
            _ => Errno::Io,
        }
    }
}
