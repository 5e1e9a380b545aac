//! WASI types consumed by the sandboxed filesystem capability layer.
//!
//! These are plain-old-data renditions of the `wasi_snapshot_preview1`
//! filesystem and socket types: the rights bitmask, errno codes, file types
//! and attributes, and the lookup/open/fd flag sets. The ABI-side numeric
//! values are preserved (`Rights` bit positions, `Errno` codes, `Filetype`
//! discriminants) so embedders can marshal them straight across the guest
//! boundary.

#[cfg(feature = "enable-serde")]
macro_rules! serde_bits {
    ($flags:ty, $bits:ty) => {
        impl serde::Serialize for $flags {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.bits(), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $flags {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let bits = <$bits as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_bits(bits)
                    .ok_or_else(|| serde::de::Error::custom("unknown flag bits set"))
            }
        }
    };
}
#[cfg(feature = "enable-serde")]
pub(crate) use serde_bits;

mod errno;
mod file;
mod net;
mod rights;

pub use errno::*;
pub use file::*;
pub use net::*;
pub use rights::*;
