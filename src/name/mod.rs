//! Domain names.
//!
//! Main types: [`Dname`], [`DnameBuf`], [`Label`].
//!
//! Names are kept in a length-prefixed binary form that is close to the DNS
//! wire format. The first octet holds the length `L` of the rest of the
//! name. It is followed by the labels, each one a length octet and up to 63
//! octets of content, and finally a single *terminator* octet at offset `L`.
//! A terminator of zero is the empty root label: the name is *complete* and
//! the octets after the first one are exactly its wire format. A terminator
//! of 255 marks a *staged* name. This is a name that was given relative to
//! some origin that hasn’t been appended yet. The status is never stored
//! anywhere else, it is always derived from the terminator.
//!
//! Since a terminator counts towards `L` and a name in wire format is at
//! most 255 octets long, `L` is between 1 and 255 and any name fits into a
//! buffer of 256 octets. The root name is `\x01\x00`.
//!
//! Names are created from their text representation (or from octets that
//! need checking) in a [`DnameBuf`]. This is a fixed-size buffer large
//! enough for any name and it is the only type that allows appending a
//! suffix via [`DnameBuf::cat`] or cutting off a zone via
//! [`DnameBuf::drop_zone`]. Once the name is final, it can be copied into an
//! exactly sized [`Dname<Octs>`][Dname] for storage. A `Dname` can be
//! compared, rendered, and checked against zones, but it cannot grow.
//!
//! The text representation follows the zonefile conventions: labels are
//! separated by dots, a trailing dot marks a complete name, and octets can
//! be escaped as `\X` or `\DDD`. The escape decoding is available
//! separately through [`unescape`] and the [`Symbol`] type.

pub use self::buf::{DnameBuf, FromStrError, LongNameError};
pub use self::dname::{Dname, DnameError, DnameIter, Status};
pub use self::escape::{try_unescape, unescape, Symbol, SymbolError, Symbols};
pub use self::label::{Label, LongLabelError, SplitLabelError};

mod buf;
mod dname;
mod escape;
mod label;
