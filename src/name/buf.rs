//! Building names.
//!
//! This is a private module for tidiness. `DnameBuf` and its error types
//! are re-exported by the parent module.

use super::dname::{Dname, DnameError, Status};
use super::escape::{Symbol, SymbolError, Symbols};
use super::label::Label;
use core::str::FromStr;
use core::{borrow, cmp, fmt, hash, ops};
use octseq::builder::{EmptyBuilder, FromBuilder, ShortBuf};

//------------ DnameBuf ------------------------------------------------------

/// A buffer for constructing a name.
///
/// The buffer has room for the longest possible name, so a name can be
/// encoded from text, extended by appending an origin, and cut back to a
/// zone-relative name without ever reallocating. It always holds a valid
/// name, either complete or staged. The name is available as a
/// [`Dname<[u8]>`][Dname] via `Deref`, covering only the octets actually
/// in use.
///
/// Once a name is finished, [`trim`][Self::trim] or
/// [`to_octets`][Dname::to_octets] copy it into exactly sized storage for
/// keeping around.
///
/// # Examples
///
/// ```
/// use dname::name::{DnameBuf, Status};
///
/// let mut name = DnameBuf::from_text(b"www").unwrap();
/// assert_eq!(name.as_slice(), b"\x05\x03www\xff");
///
/// let origin = DnameBuf::from_text(b"a.com.").unwrap();
/// assert_eq!(name.cat(&*origin).unwrap(), Status::Complete);
/// assert_eq!(name.as_slice(), b"\x0b\x03www\x01a\x03com\x00");
/// ```
#[derive(Clone)]
pub struct DnameBuf([u8; 256]);

/// # Creating Values
///
impl DnameBuf {
    /// Creates a buffer holding the root name.
    #[must_use]
    pub fn root() -> Self {
        let mut buf = [0u8; 256];
        buf[0] = 1;
        DnameBuf(buf)
    }

    /// Encodes a name from its text form.
    ///
    /// The text is a sequence of labels separated by dots. A dot, or any
    /// other octet, can be made part of a label by escaping it as `\X` or
    /// `\DDD`. Unescaped upper case ASCII letters are folded to lower case.
    /// Escaped octets are taken as they are, so `\065` stays an upper case
    /// `A`. This is what allows the `Display` output of any name to be
    /// encoded back into the same octets.
    ///
    /// If the text ends in an unescaped dot, the name is complete.
    /// Otherwise it is staged and needs to be completed by appending an
    /// origin via [`cat`][Self::cat]. A single dot is the root name.
    ///
    /// Fails if the text is empty, contains an empty label, a malformed
    /// escape sequence, a label longer than 63 octets, or if the encoded
    /// name is longer than 255 octets.
    pub fn from_text(text: &[u8]) -> Result<Self, FromStrError> {
        if text.is_empty() {
            return Err(FromStrError::EmptyInput);
        }
        if text == b"." {
            return Ok(Self::root());
        }

        let mut encoder = Encoder::new();
        let mut symbols = Symbols::new(text);
        for symbol in symbols.by_ref() {
            match symbol {
                _ if symbol.is_separator() => encoder.end_label()?,
                Symbol::Char(ch) => encoder.push(ch.to_ascii_lowercase())?,
                _ => encoder.push(symbol.into_octet())?,
            }
        }
        if let Some(err) = symbols.error() {
            return Err(err.into());
        }
        Ok(encoder.finish())
    }

    /// Copies a name into a new buffer.
    pub fn from_dname<Octs>(name: &Dname<Octs>) -> Self
    where
        Octs: AsRef<[u8]> + ?Sized,
    {
        let mut buf = [0u8; 256];
        let slice = name.as_slice();
        buf[..slice.len()].copy_from_slice(slice);
        DnameBuf(buf)
    }

    /// Classifies the name held in a full-sized buffer.
    ///
    /// Whatever the content, a name described by the length octet cannot
    /// extend past the end of the array, so no capacity needs to be given.
    pub fn check_array(array: &[u8; 256]) -> Result<Status, DnameError> {
        Dname::check_slice(array)
    }

    /// Creates a buffer from an array, checking that it holds a name.
    ///
    /// Octets after the end of the name are kept but ignored.
    pub fn from_array(array: [u8; 256]) -> Result<Self, DnameError> {
        Self::check_array(&array)?;
        Ok(DnameBuf(array))
    }
}

/// # Access
///
impl DnameBuf {
    /// Returns a reference to the name.
    pub fn as_dname(&self) -> &Dname<[u8]> {
        let len = usize::from(self.0[0]) + 1;
        unsafe { Dname::from_slice_unchecked(&self.0[..len]) }
    }

    /// Returns a mutable reference to the name.
    pub fn as_dname_mut(&mut self) -> &mut Dname<[u8]> {
        let len = usize::from(self.0[0]) + 1;
        unsafe { Dname::from_slice_mut_unchecked(&mut self.0[..len]) }
    }

    /// Returns the whole buffer, including unused octets.
    pub fn as_array(&self) -> &[u8; 256] {
        &self.0
    }
}

/// # Combining
///
impl DnameBuf {
    /// Appends `suffix` to the name.
    ///
    /// The terminator of `self` is replaced by the payload of `suffix`. The
    /// resulting name takes its status from `suffix`: appending a complete
    /// origin completes the name, appending a staged one leaves it staged.
    /// Appending to an already complete name is allowed, the root label is
    /// simply dropped.
    ///
    /// If the combined name would be longer than 255 octets, an error is
    /// returned and `self` is left unchanged.
    pub fn cat<Octs>(
        &mut self,
        suffix: &Dname<Octs>,
    ) -> Result<Status, LongNameError>
    where
        Octs: AsRef<[u8]> + ?Sized,
    {
        let start = self.payload_len();
        let new_len = (start - 1) + suffix.payload_len();
        if new_len > Dname::MAX_LEN {
            return Err(LongNameError(()));
        }
        self.0[start..=new_len].copy_from_slice(suffix.payload());
        self.0[0] = new_len as u8;
        Ok(suffix.status())
    }

    /// Turns a staged name into a complete one.
    ///
    /// Complete names are left alone.
    pub fn terminate(&mut self) {
        self.as_dname_mut().terminate()
    }

    /// Removes the zone `zroot` from the end of the name.
    ///
    /// The name is re-rooted: the labels of `zroot` are dropped and the
    /// root label takes their place, so the result is complete. A name
    /// equal to `zroot` becomes the root name. Appending `zroot` again via
    /// [`cat`][Self::cat] restores the original name.
    ///
    /// Both names must be complete and `self` must be within `zroot` as
    /// determined by [`Dname::is_in_zone`]. This is only checked in debug
    /// builds.
    pub fn drop_zone<Octs>(&mut self, zroot: &Dname<Octs>)
    where
        Octs: AsRef<[u8]> + ?Sized,
    {
        debug_assert!(self.is_in_zone(zroot), "name not in zone");
        let newterm = self.payload_len() + 1 - zroot.payload_len();
        self.0[newterm] = Status::COMPLETE_MARKER;
        self.0[0] = newterm as u8;
    }
}

/// # Trimming
///
impl DnameBuf {
    /// Copies the name into an exactly sized vec.
    ///
    /// The returned name has no room to grow. Use this once a name won’t be
    /// extended anymore.
    #[cfg(feature = "std")]
    pub fn trim(&self) -> Dname<std::vec::Vec<u8>> {
        self.as_dname().to_vec()
    }

    /// Copies the name into an exactly sized octets sequence of any type.
    pub fn trim_into<Target>(&self) -> Result<Dname<Target>, ShortBuf>
    where
        Target: FromBuilder,
        <Target as FromBuilder>::Builder: EmptyBuilder,
    {
        self.as_dname().to_octets()
    }
}

//--- Default

impl Default for DnameBuf {
    fn default() -> Self {
        Self::root()
    }
}

//--- FromStr

impl FromStr for DnameBuf {
    type Err = FromStrError;

    /// Encodes a name from its text form.
    ///
    /// See [`from_text`][Self::from_text] for details.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s.as_bytes())
    }
}

//--- Deref, DerefMut, AsRef, and Borrow

impl ops::Deref for DnameBuf {
    type Target = Dname<[u8]>;

    fn deref(&self) -> &Self::Target {
        self.as_dname()
    }
}

impl ops::DerefMut for DnameBuf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_dname_mut()
    }
}

impl AsRef<Dname<[u8]>> for DnameBuf {
    fn as_ref(&self) -> &Dname<[u8]> {
        self.as_dname()
    }
}

impl AsRef<[u8]> for DnameBuf {
    fn as_ref(&self) -> &[u8] {
        self.as_dname().as_slice()
    }
}

impl borrow::Borrow<Dname<[u8]>> for DnameBuf {
    fn borrow(&self) -> &Dname<[u8]> {
        self.as_dname()
    }
}

//--- PartialEq and Eq

impl PartialEq for DnameBuf {
    fn eq(&self, other: &Self) -> bool {
        self.as_dname().eq(other.as_dname())
    }
}

impl<Octs: AsRef<[u8]> + ?Sized> PartialEq<Dname<Octs>> for DnameBuf {
    fn eq(&self, other: &Dname<Octs>) -> bool {
        self.as_dname().eq(other)
    }
}

impl Eq for DnameBuf {}

//--- PartialOrd and Ord

impl PartialOrd for DnameBuf {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DnameBuf {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.as_dname().composed_cmp(other.as_dname())
    }
}

//--- Hash

impl hash::Hash for DnameBuf {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_dname().hash(state)
    }
}

//--- Display and Debug

impl fmt::Display for DnameBuf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self.as_dname(), f)
    }
}

impl fmt::Debug for DnameBuf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DnameBuf({})", self.as_dname())
    }
}

//------------ Encoder -------------------------------------------------------

/// Encodes labels into a name buffer one octet at a time.
struct Encoder {
    /// The buffer to build the name in.
    buf: [u8; 256],

    /// The offset to write the next octet to.
    write_offset: usize,

    /// The offset of the length octet of the current label.
    ///
    /// If `label_offset < write_offset`, a label is currently being built.
    /// Otherwise, the two are equal.
    label_offset: usize,
}

impl Encoder {
    fn new() -> Self {
        Encoder {
            buf: [0; 256],
            write_offset: 1,
            label_offset: 1,
        }
    }

    fn in_label(&self) -> bool {
        self.label_offset < self.write_offset
    }

    /// Appends an octet to the current label, starting one if necessary.
    fn push(&mut self, ch: u8) -> Result<(), FromStrError> {
        if !self.in_label() {
            // Leave room for the length octet.
            self.write_offset += 1;
        }
        if self.write_offset - self.label_offset > Label::MAX_LEN {
            return Err(FromStrError::LongLabel);
        }
        // The terminator still has to go after this octet.
        if self.write_offset >= Dname::MAX_LEN {
            return Err(FromStrError::LongName);
        }
        self.buf[self.write_offset] = ch;
        self.write_offset += 1;
        Ok(())
    }

    /// Ends the current label.
    fn end_label(&mut self) -> Result<(), FromStrError> {
        if !self.in_label() {
            return Err(FromStrError::EmptyLabel);
        }
        self.close_label();
        Ok(())
    }

    /// Writes the length octet of the current label.
    ///
    /// A label is non-empty as soon as it is started, so this can only be
    /// called while in a label.
    fn close_label(&mut self) {
        debug_assert!(self.in_label());
        self.buf[self.label_offset] =
            (self.write_offset - self.label_offset - 1) as u8;
        self.label_offset = self.write_offset;
    }

    /// Adds the terminator and length octet.
    ///
    /// An unfinished label makes for a staged name.
    fn finish(mut self) -> DnameBuf {
        let status = if self.in_label() {
            self.close_label();
            Status::Staged
        } else {
            Status::Complete
        };
        self.buf[self.write_offset] = status.marker();
        self.buf[0] = self.write_offset as u8;
        DnameBuf(self.buf)
    }
}

//============ Error Types ===================================================

//------------ FromStrError --------------------------------------------------

/// An error happened while encoding a name from text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum FromStrError {
    /// The text was empty.
    EmptyInput,

    /// The text contained a malformed escape sequence.
    BadEscape(SymbolError),

    /// The text contained an empty label.
    ///
    /// This happens for leading or doubled dots.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The name was longer than 255 octets.
    LongName,
}

//--- From

impl From<SymbolError> for FromStrError {
    fn from(err: SymbolError) -> FromStrError {
        FromStrError::BadEscape(err)
    }
}

//--- Display and Error

impl fmt::Display for FromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FromStrError::EmptyInput => f.write_str("empty name"),
            FromStrError::BadEscape(err) => fmt::Display::fmt(&err, f),
            FromStrError::EmptyLabel => f.write_str("empty label"),
            FromStrError::LongLabel => f.write_str("long label"),
            FromStrError::LongName => f.write_str("long domain name"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FromStrError {}

//------------ LongNameError -------------------------------------------------

/// Appending a name would have exceeded the size limit for names.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongNameError(());

//--- Display and Error

impl fmt::Display for LongNameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("long domain name")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LongNameError {}

//============ Testing =======================================================
