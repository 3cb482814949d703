//! Domain names for an authoritative DNS server.
//!
//! This crate provides the representation of domain names used throughout
//! an authoritative name server: a compact, length-prefixed binary form that
//! is compatible with the DNS wire format, the conversion from and to the
//! zonefile text representation, and the operations a server needs on
//! names, such as comparing, appending an origin, checking whether a name
//! lives within a zone, and stripping a zone’s apex off a name.
//!
//! # Modules
//!
//! * [name] contains the name types and all operations on them. It is
//!   always available and works without `std`.
#![cfg_attr(feature = "zone", doc = "* [zone]:")]
#![cfg_attr(not(feature = "zone"), doc = "* zone:")]
//!   Building owner names for the records of a zone from their text
//!   representation relative to the zone’s apex.
//!
//! # Reference of Feature Flags
//!
//! The following is the complete list of the feature flags available.
//!
//! * `bytes`: Enables using the type `Bytes` from the
//!    [bytes](https://github.com/tokio-rs/bytes) crate as octet sequences.
//! * `serde`: Enables serde serialization for names.
//! * `std`: support for the Rust std library. This feature is enabled by
//!   default.
//! * `zone`: Owner name construction for zones. This enables the
#![cfg_attr(feature = "zone", doc = "  [zone]")]
#![cfg_attr(not(feature = "zone"), doc = "  zone")]
//!   module and currently also enables the `std` feature. It is enabled by
//!   default.

#![no_std]
#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
#[allow(unused_imports)] // Import macros even if unused.
#[macro_use]
extern crate std;

pub mod name;

#[cfg(feature = "zone")]
#[cfg_attr(docsrs, doc(cfg(feature = "zone")))]
pub mod zone;
