use std::net::SocketAddr;

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Address family of a socket.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "enable-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddressFamily {
    /// Unspecified; any family is acceptable.
    #[default]
    Unspec,
    /// IPv4.
    Inet4,
    /// IPv6.
    Inet6,
}

/// Socket communication semantics.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "enable-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SockType {
    /// Datagram socket.
    #[default]
    Dgram,
    /// Byte-stream socket.
    Stream,
}

bitflags! {
    /// Flags for the `get_addrinfo` hint.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct AiFlags: u16 {
        /// Socket address is intended for bind.
        const AI_PASSIVE = 1 << 0;
        /// Request a canonical name.
        const AI_CANONNAME = 1 << 1;
        /// The node argument is a numeric host address.
        const AI_NUMERICHOST = 1 << 2;
        /// The service argument is a numeric port string.
        const AI_NUMERICSERV = 1 << 3;
        /// Return IPv4-mapped IPv6 addresses.
        const AI_V4MAPPED = 1 << 4;
        /// Return both IPv4 and IPv6 addresses.
        const AI_ALL = 1 << 5;
        /// Only return address families configured on this host.
        const AI_ADDRCONFIG = 1 << 6;
    }
}

#[cfg(feature = "enable-serde")]
crate::serde_bits!(AiFlags, u16);

impl Default for AiFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Selection criteria for a `get_addrinfo` query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "enable-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddrinfoHint {
    pub flags: AiFlags,
    pub family: AddressFamily,
    pub socktype: SockType,
}

/// One address returned by a `get_addrinfo` query.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "enable-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Addrinfo {
    pub family: AddressFamily,
    pub socktype: SockType,
    pub address: SocketAddr,
    /// Canonical name of the host, when `AI_CANONNAME` was requested.
    pub canonname: Option<String>,
}
