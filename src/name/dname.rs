//! Length-prefixed domain names.
//!
//! This is a private module. Its public types are re-exported by the parent.

use super::buf::DnameBuf;
use super::label::{Label, SplitLabelError};
#[cfg(feature = "bytes")]
use bytes::Bytes;
use core::{borrow, cmp, fmt, hash, mem};
use octseq::builder::{EmptyBuilder, FromBuilder, OctetsBuilder, ShortBuf};
#[cfg(feature = "serde")]
use octseq::builder::FreezeBuilder;
#[cfg(feature = "serde")]
use octseq::serde::{DeserializeOctets, SerializeOctets};
#[cfg(feature = "std")]
use std::vec::Vec;

//------------ Status --------------------------------------------------------

/// Whether a name is ready for use or still waiting for its origin.
///
/// The status is not stored separately but derived from the last octet of
/// the encoded name, the *terminator*.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Status {
    /// The name is fully qualified.
    ///
    /// Its terminator is the root label, so the payload is identical to the
    /// name’s wire format.
    Complete,

    /// The name is still relative.
    ///
    /// It ends in the staged marker instead of the root label and needs an
    /// origin appended via [`DnameBuf::cat`] before it can be used on the
    /// wire.
    Staged,
}

impl Status {
    /// The terminator of a complete name, which is the root label.
    pub const COMPLETE_MARKER: u8 = 0;

    /// The terminator of a staged name.
    pub const STAGED_MARKER: u8 = 0xFF;

    /// Returns the status for a terminator octet.
    #[must_use]
    pub fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            Self::COMPLETE_MARKER => Some(Status::Complete),
            Self::STAGED_MARKER => Some(Status::Staged),
            _ => None,
        }
    }

    /// Returns the terminator octet for this status.
    #[must_use]
    pub fn marker(self) -> u8 {
        match self {
            Status::Complete => Self::COMPLETE_MARKER,
            Status::Staged => Self::STAGED_MARKER,
        }
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, Status::Complete)
    }

    #[must_use]
    pub fn is_staged(self) -> bool {
        matches!(self, Status::Staged)
    }
}

//--- Display

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Status::Complete => "complete",
            Status::Staged => "staged",
        })
    }
}

//------------ Dname ---------------------------------------------------------

/// A length-prefixed domain name.
///
/// The type wraps an octets sequence that contains a name in the following
/// encoding: the first octet is the number `L` of octets that follow it,
/// the *payload*. The payload is a sequence of labels, each a length octet
/// between 1 and 63 followed by that many octets of content, and ends in a
/// single *terminator* octet at offset `L`. A terminator of 0 marks a
/// [complete][Status::Complete] name whose payload is exactly its wire
/// format. A terminator of 255 marks a [staged][Status::Staged] name that
/// still needs its origin appended.
///
/// Some examples:
///
/// | text     | encoded                   |
/// |----------|---------------------------|
/// | `.`      | `\x01\x00`                |
/// | `com.`   | `\x05\x03com\x00`         |
/// | `a.com.` | `\x07\x01a\x03com\x00`    |
/// | `www`    | `\x05\x03www\xff`         |
///
/// A value of this type always wraps exactly `L + 1` octets of a valid
/// name. Values are created by checking arbitrary octets through
/// [`from_octets`][Self::from_octets] or [`from_slice`][Self::from_slice],
/// or by trimming a [`DnameBuf`] once construction is finished. Because the
/// octets carry no spare room, a [`Dname`] cannot grow. Names are built and
/// combined in a [`DnameBuf`] instead.
#[derive(Clone)]
#[repr(transparent)]
pub struct Dname<Octs: ?Sized>(Octs);

impl Dname<()> {
    /// The maximum value of the length octet.
    ///
    /// This is also the maximum length of a name in wire format.
    pub const MAX_LEN: usize = 255;

    /// The number of octets needed to hold any name including its length
    /// octet.
    pub const BUF_LEN: usize = 256;
}

/// # Creating Values
///
impl<Octs> Dname<Octs> {
    /// Creates a name from the underlying octets without any check.
    ///
    /// # Safety
    ///
    /// The octets sequence passed in `octets` must contain a correctly
    /// encoded complete or staged name and nothing else.
    pub const unsafe fn from_octets_unchecked(octets: Octs) -> Self {
        Self(octets)
    }

    /// Creates a name from an octets sequence.
    ///
    /// This will only succeed if `octets` contains a correctly encoded name,
    /// either complete or staged, and no further octets after it.
    pub fn from_octets(octets: Octs) -> Result<Self, DnameError>
    where
        Octs: AsRef<[u8]>,
    {
        let slice = octets.as_ref();
        Dname::check_slice(slice)?;
        if slice.len() != usize::from(slice[0]) + 1 {
            return Err(DnameError(DnameErrorEnum::TrailingData));
        }
        Ok(unsafe { Self::from_octets_unchecked(octets) })
    }

    /// Returns the complete name consisting of the root label only.
    #[must_use]
    pub fn root() -> Self
    where
        Octs: From<&'static [u8]>,
    {
        unsafe { Self::from_octets_unchecked(b"\x01\x00".as_ref().into()) }
    }
}

impl Dname<[u8]> {
    /// Creates a name from an octets slice without checking.
    pub(super) unsafe fn from_slice_unchecked(slice: &[u8]) -> &Self {
        // SAFETY: Dname has repr(transparent)
        mem::transmute(slice)
    }

    /// Creates a mutable name from an octets slice without checking.
    pub(super) unsafe fn from_slice_mut_unchecked(
        slice: &mut [u8],
    ) -> &mut Self {
        // SAFETY: Dname has repr(transparent)
        mem::transmute(slice)
    }

    /// Creates a name from the beginning of an octets slice.
    ///
    /// The length of `slice` is taken as the capacity of the buffer the name
    /// lives in. The name is checked without ever looking beyond that
    /// capacity, which makes this the function to use on octets of unknown
    /// origin. Octets after the end of the name are ignored and not part of
    /// the returned value.
    ///
    /// # Examples
    ///
    /// ```
    /// use dname::name::Dname;
    ///
    /// let name = Dname::from_slice(b"\x05\x03www\xffspare").unwrap();
    /// assert!(name.is_staged());
    /// assert_eq!(name.as_slice(), b"\x05\x03www\xff");
    /// ```
    pub fn from_slice(slice: &[u8]) -> Result<&Self, DnameError> {
        Self::check_slice(slice)?;
        let len = usize::from(slice[0]) + 1;
        Ok(unsafe { Self::from_slice_unchecked(&slice[..len]) })
    }

    /// Returns the root name atop a static octets slice.
    #[must_use]
    pub fn root_slice() -> &'static Self {
        unsafe { Self::from_slice_unchecked(b"\x01\x00") }
    }

    /// Classifies the name at the beginning of an octets slice.
    ///
    /// The length of `slice` is the capacity of the buffer. An empty slice
    /// or one shorter than the name’s length octet claims is rejected before
    /// any label is looked at. Octets after the end of the name are
    /// ignored.
    pub fn check_slice(slice: &[u8]) -> Result<Status, DnameError> {
        let len = match slice.first() {
            Some(len) => usize::from(*len),
            None => return Err(DnameError(DnameErrorEnum::ShortBuf)),
        };
        if len == 0 {
            return Err(DnameError(DnameErrorEnum::EmptyName));
        }
        if len + 1 > slice.len() {
            return Err(DnameError(DnameErrorEnum::ShortBuf));
        }
        Self::check_payload(&slice[1..=len])
    }

    /// Checks the labels and terminator of a non-empty payload.
    fn check_payload(mut payload: &[u8]) -> Result<Status, DnameError> {
        loop {
            if let [marker] = *payload {
                return Status::from_marker(marker).ok_or(DnameError(
                    DnameErrorEnum::BadTerminator(marker),
                ));
            }
            let (label, tail) = Label::split_from(payload)?;
            if label.is_empty() {
                return Err(DnameError(DnameErrorEnum::EmbeddedRoot));
            }
            if tail.is_empty() {
                // The label covered the terminator.
                return Err(DnameError(DnameErrorEnum::ShortInput));
            }
            payload = tail;
        }
    }
}

impl Dname<&'static [u8]> {
    /// Returns the root name atop a slice reference.
    #[must_use]
    pub fn root_ref() -> Self {
        Self::root()
    }
}

#[cfg(feature = "std")]
impl Dname<Vec<u8>> {
    /// Returns the root name atop a `Vec<u8>`.
    #[must_use]
    pub fn root_vec() -> Self {
        Self::root()
    }
}

#[cfg(feature = "bytes")]
impl Dname<Bytes> {
    /// Returns the root name atop a bytes value.
    pub fn root_bytes() -> Self {
        Self::root()
    }
}

/// # Conversions
///
impl<Octs: ?Sized> Dname<Octs> {
    /// Returns a reference to the underlying octets sequence.
    pub fn as_octets(&self) -> &Octs {
        &self.0
    }

    /// Converts the name into the underlying octets sequence.
    pub fn into_octets(self) -> Octs
    where
        Octs: Sized,
    {
        self.0
    }

    /// Returns a name using a reference to the octets.
    pub fn for_ref(&self) -> Dname<&Octs> {
        unsafe { Dname::from_octets_unchecked(&self.0) }
    }

    /// Returns a reference to the encoded name, length octet included.
    pub fn as_slice(&self) -> &[u8]
    where
        Octs: AsRef<[u8]>,
    {
        self.0.as_ref()
    }

    /// Returns a name for the octets slice of the content.
    pub fn for_slice(&self) -> &Dname<[u8]>
    where
        Octs: AsRef<[u8]>,
    {
        unsafe { Dname::from_slice_unchecked(self.0.as_ref()) }
    }

    /// Copies the name into a new, exactly sized octets sequence.
    ///
    /// This is how a finished name is moved into long term storage. The
    /// result cannot be grown anymore.
    pub fn to_octets<Target>(&self) -> Result<Dname<Target>, ShortBuf>
    where
        Octs: AsRef<[u8]>,
        Target: FromBuilder,
        <Target as FromBuilder>::Builder: EmptyBuilder,
    {
        let mut builder =
            <Target as FromBuilder>::Builder::with_capacity(self.len());
        builder.append_slice(self.as_slice()).map_err(Into::into)?;
        Ok(unsafe { Dname::from_octets_unchecked(Target::from_builder(builder)) })
    }

    /// Copies the name into a new, exactly sized vec.
    #[cfg(feature = "std")]
    pub fn to_vec(&self) -> Dname<Vec<u8>>
    where
        Octs: AsRef<[u8]>,
    {
        unsafe { Dname::from_octets_unchecked(Vec::from(self.as_slice())) }
    }

    /// Copies the name into a construction buffer.
    pub fn to_buf(&self) -> DnameBuf
    where
        Octs: AsRef<[u8]>,
    {
        DnameBuf::from_dname(self)
    }
}

/// # Properties
///
impl<Octs: AsRef<[u8]> + ?Sized> Dname<Octs> {
    /// Returns the number of octets of the encoded name.
    ///
    /// This includes the length octet and is therefore one more than
    /// [`payload_len`][Self::payload_len].
    #[allow(clippy::len_without_is_empty)] // never empty ...
    pub fn len(&self) -> usize {
        self.0.as_ref().len()
    }

    /// Returns the value of the length octet.
    pub fn payload_len(&self) -> usize {
        usize::from(self.0.as_ref()[0])
    }

    /// Returns the labels and terminator without the length octet.
    ///
    /// For a complete name, this is the name in wire format.
    pub fn payload(&self) -> &[u8] {
        &self.0.as_ref()[1..]
    }

    /// Returns the terminator octet.
    fn terminator(&self) -> u8 {
        self.0.as_ref()[self.payload_len()]
    }

    /// Returns whether the name is complete or staged.
    ///
    /// This only looks at the terminator.
    pub fn status(&self) -> Status {
        if self.is_staged() {
            Status::Staged
        } else {
            Status::Complete
        }
    }

    /// Returns whether the name still waits for its origin.
    pub fn is_staged(&self) -> bool {
        self.terminator() == Status::STAGED_MARKER
    }

    /// Returns whether the name is fully qualified.
    pub fn is_complete(&self) -> bool {
        !self.is_staged()
    }

    /// Returns whether the name is the complete root name.
    pub fn is_root(&self) -> bool {
        self.0.as_ref() == b"\x01\x00"
    }

    /// Returns whether the first label is the wildcard label `*`.
    pub fn is_wildcard(&self) -> bool {
        self.first().map_or(false, Label::is_wildcard)
    }
}

/// # Working with Labels
///
impl<Octs: AsRef<[u8]> + ?Sized> Dname<Octs> {
    /// Returns an iterator over the labels of the name.
    ///
    /// The terminator is not returned as a label.
    pub fn iter(&self) -> DnameIter {
        DnameIter::new(self.payload())
    }

    /// Returns the number of labels, not counting the terminator.
    pub fn label_count(&self) -> usize {
        self.iter().count()
    }

    /// Returns the first label or `None` if there are no labels.
    pub fn first(&self) -> Option<&Label> {
        self.iter().next()
    }

    /// Returns whether the name is within the zone rooted at `zone`.
    ///
    /// A name is within its own zone. The suffix of `self` must not only
    /// match `zone` octet for octet but also start at a label boundary, so
    /// `wwwa.com.` is not within `a.com.`.
    ///
    /// Both names must be complete.
    pub fn is_in_zone<Other>(&self, zone: &Dname<Other>) -> bool
    where
        Other: AsRef<[u8]> + ?Sized,
    {
        debug_assert!(self.is_complete(), "staged name in zone check");
        debug_assert!(zone.is_complete(), "staged zone in zone check");

        let child = self.payload();
        let parent = zone.payload();
        if parent.len() > child.len() {
            return false;
        }
        let parent_start = child.len() - parent.len();
        if child[parent_start..] != *parent {
            return false;
        }

        // The octets match, but the match needs to start at a label.
        let mut pos = 0;
        while pos < parent_start {
            pos += usize::from(child[pos]) + 1;
        }
        pos == parent_start
    }

    /// Returns the ordering between `self` and `other`.
    ///
    /// Shorter names sort first. Names of equal length are ordered by their
    /// payload octets. The ordering is only good for keeping sorted
    /// collections deterministic; it has nothing to do with the canonical
    /// DNS name order. Since the terminator is part of the payload, a
    /// complete and a staged name are never equal.
    pub fn composed_cmp<Other>(&self, other: &Dname<Other>) -> cmp::Ordering
    where
        Other: AsRef<[u8]> + ?Sized,
    {
        self.payload_len()
            .cmp(&other.payload_len())
            .then_with(|| self.payload().cmp(other.payload()))
    }
}

/// # Presentation Format
///
impl<Octs: AsRef<[u8]> + ?Sized> Dname<Octs> {
    /// Appends the name in text form to an octets builder.
    ///
    /// Label content is copied as is, without any escaping, followed by a
    /// dot after each label but the last. A complete name ends in a dot, a
    /// staged name doesn’t. The root name becomes a single dot.
    ///
    /// Because nothing is escaped, the output is only safe to show if the
    /// labels are known to be printable. The `Display` implementation
    /// escapes and should be used otherwise.
    pub fn compose_text<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        let mut labels = self.iter();
        match labels.next() {
            Some(label) => target.append_slice(label.as_slice())?,
            None => {
                if self.is_complete() {
                    target.append_slice(b".")?;
                }
                return Ok(());
            }
        }
        for label in labels {
            target.append_slice(b".")?;
            target.append_slice(label.as_slice())?;
        }
        if self.is_complete() {
            target.append_slice(b".")?;
        }
        Ok(())
    }

    /// Returns the name in unescaped text form.
    #[cfg(feature = "std")]
    pub fn to_text_vec(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.len());
        octseq::builder::infallible(self.compose_text(&mut res));
        res
    }
}

/// # Modifying
///
impl<Octs: AsRef<[u8]> + AsMut<[u8]> + ?Sized> Dname<Octs> {
    /// Turns a staged name into a complete one.
    ///
    /// This replaces the terminator with the root label. Complete names are
    /// left alone.
    pub fn terminate(&mut self) {
        let len = self.payload_len();
        debug_assert!(len > 0);
        self.0.as_mut()[len] = Status::COMPLETE_MARKER;
    }
}

//--- AsRef

impl<Octs> AsRef<Octs> for Dname<Octs> {
    fn as_ref(&self) -> &Octs {
        &self.0
    }
}

impl<Octs: AsRef<[u8]> + ?Sized> AsRef<[u8]> for Dname<Octs> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<Octs: AsRef<[u8]>> AsRef<Dname<[u8]>> for Dname<Octs> {
    fn as_ref(&self) -> &Dname<[u8]> {
        self.for_slice()
    }
}

//--- Borrow

impl<Octs: AsRef<[u8]>> borrow::Borrow<Dname<[u8]>> for Dname<Octs> {
    fn borrow(&self) -> &Dname<[u8]> {
        self.for_slice()
    }
}

//--- PartialEq and Eq

impl<Octs, Other> PartialEq<Dname<Other>> for Dname<Octs>
where
    Octs: AsRef<[u8]> + ?Sized,
    Other: AsRef<[u8]> + ?Sized,
{
    fn eq(&self, other: &Dname<Other>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<Octs: AsRef<[u8]> + ?Sized> Eq for Dname<Octs> {}

//--- PartialOrd and Ord

impl<Octs, Other> PartialOrd<Dname<Other>> for Dname<Octs>
where
    Octs: AsRef<[u8]> + ?Sized,
    Other: AsRef<[u8]> + ?Sized,
{
    fn partial_cmp(&self, other: &Dname<Other>) -> Option<cmp::Ordering> {
        Some(self.composed_cmp(other))
    }
}

impl<Octs: AsRef<[u8]> + ?Sized> Ord for Dname<Octs> {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.composed_cmp(other)
    }
}

//--- Hash

impl<Octs: AsRef<[u8]> + ?Sized> hash::Hash for Dname<Octs> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

//--- IntoIterator

impl<'a, Octs> IntoIterator for &'a Dname<Octs>
where
    Octs: AsRef<[u8]> + ?Sized,
{
    type Item = &'a Label;
    type IntoIter = DnameIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//--- Display and Debug

impl<Octs: AsRef<[u8]> + ?Sized> fmt::Display for Dname<Octs> {
    /// Formats the name in presentation format.
    ///
    /// Label content is escaped so that [`DnameBuf::from_text`] turns the
    /// output back into the same octets. Complete names end in a dot,
    /// staged names don’t.
    ///
    /// The one exception is a staged name without any labels. It is
    /// written as the empty string, which doesn’t encode into a name.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut labels = self.iter();
        match labels.next() {
            Some(label) => fmt::Display::fmt(label, f)?,
            None => {
                if self.is_complete() {
                    f.write_str(".")?;
                }
                return Ok(());
            }
        }
        for label in labels {
            write!(f, ".{}", label)?;
        }
        if self.is_complete() {
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl<Octs: AsRef<[u8]> + ?Sized> fmt::Debug for Dname<Octs> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Dname({})", self)
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl<Octs> serde::Serialize for Dname<Octs>
where
    Octs: AsRef<[u8]> + SerializeOctets + ?Sized,
{
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            if self.is_staged() && self.payload_len() == 1 {
                return Err(serde::ser::Error::custom(
                    "staged name without labels has no text form",
                ));
            }
            serializer
                .serialize_newtype_struct("Dname", &format_args!("{}", self))
        } else {
            serializer.serialize_newtype_struct(
                "Dname",
                &self.0.as_serialized_octets(),
            )
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, Octs> serde::Deserialize<'de> for Dname<Octs>
where
    Octs: FromBuilder + DeserializeOctets<'de>,
    <Octs as FromBuilder>::Builder:
        FreezeBuilder<Octets = Octs> + EmptyBuilder,
{
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        use core::marker::PhantomData;

        struct InnerVisitor<'de, T: DeserializeOctets<'de>>(T::Visitor);

        impl<'de, Octs> serde::de::Visitor<'de> for InnerVisitor<'de, Octs>
        where
            Octs: FromBuilder + DeserializeOctets<'de>,
            <Octs as FromBuilder>::Builder:
                FreezeBuilder<Octets = Octs> + EmptyBuilder,
        {
            type Value = Dname<Octs>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a domain name")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                DnameBuf::from_text(v.as_bytes())
                    .map_err(E::custom)?
                    .to_octets()
                    .map_err(E::custom)
            }

            fn visit_borrowed_bytes<E: serde::de::Error>(
                self,
                value: &'de [u8],
            ) -> Result<Self::Value, E> {
                self.0.visit_borrowed_bytes(value).and_then(|octets| {
                    Dname::from_octets(octets).map_err(E::custom)
                })
            }

            #[cfg(feature = "std")]
            fn visit_byte_buf<E: serde::de::Error>(
                self,
                value: std::vec::Vec<u8>,
            ) -> Result<Self::Value, E> {
                self.0.visit_byte_buf(value).and_then(|octets| {
                    Dname::from_octets(octets).map_err(E::custom)
                })
            }
        }

        struct NewtypeVisitor<T>(PhantomData<T>);

        impl<'de, Octs> serde::de::Visitor<'de> for NewtypeVisitor<Octs>
        where
            Octs: FromBuilder + DeserializeOctets<'de>,
            <Octs as FromBuilder>::Builder:
                FreezeBuilder<Octets = Octs> + EmptyBuilder,
        {
            type Value = Dname<Octs>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a domain name")
            }

            fn visit_newtype_struct<D: serde::Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> Result<Self::Value, D::Error> {
                if deserializer.is_human_readable() {
                    deserializer
                        .deserialize_str(InnerVisitor(Octs::visitor()))
                } else {
                    Octs::deserialize_with_visitor(
                        deserializer,
                        InnerVisitor(Octs::visitor()),
                    )
                }
            }
        }

        deserializer
            .deserialize_newtype_struct("Dname", NewtypeVisitor(PhantomData))
    }
}

//------------ DnameIter -----------------------------------------------------

/// An iterator over the labels of a name.
///
/// The terminator is not considered a label and is never returned.
#[derive(Clone, Debug)]
pub struct DnameIter<'a> {
    /// The remaining payload, terminator included.
    slice: &'a [u8],
}

impl<'a> DnameIter<'a> {
    pub(super) fn new(slice: &'a [u8]) -> Self {
        DnameIter { slice }
    }
}

impl<'a> Iterator for DnameIter<'a> {
    type Item = &'a Label;

    fn next(&mut self) -> Option<Self::Item> {
        if self.slice.len() <= 1 {
            return None;
        }
        match Label::split_from(self.slice) {
            Ok((label, tail)) if !label.is_empty() => {
                self.slice = tail;
                Some(label)
            }
            _ => {
                self.slice = &[];
                None
            }
        }
    }
}

//============ Error Types ===================================================

//------------ DnameError ----------------------------------------------------

/// A name wasn’t encoded correctly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DnameError(DnameErrorEnum);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DnameErrorEnum {
    /// The buffer was empty or shorter than the length octet claims.
    ShortBuf,

    /// The length octet was zero.
    EmptyName,

    /// A label length octet was larger than 63.
    BadLabel(u8),

    /// A zero length octet appeared before the terminator.
    EmbeddedRoot,

    /// A label ran into or past the terminator.
    ShortInput,

    /// The octet at the end of the payload was neither 0 nor 255.
    BadTerminator(u8),

    /// There were more octets after the end of the name.
    TrailingData,
}

//--- From

impl From<SplitLabelError> for DnameError {
    fn from(err: SplitLabelError) -> Self {
        Self(match err {
            SplitLabelError::BadLength(len) => DnameErrorEnum::BadLabel(len),
            SplitLabelError::ShortInput => DnameErrorEnum::ShortInput,
        })
    }
}

//--- Display and Error

impl fmt::Display for DnameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            DnameErrorEnum::ShortBuf => f.write_str("short buffer"),
            DnameErrorEnum::EmptyName => f.write_str("empty name"),
            DnameErrorEnum::BadLabel(len) => {
                write!(f, "invalid label length {}", len)
            }
            DnameErrorEnum::EmbeddedRoot => {
                f.write_str("root label inside name")
            }
            DnameErrorEnum::ShortInput => {
                f.write_str("label runs past end of name")
            }
            DnameErrorEnum::BadTerminator(marker) => {
                write!(f, "invalid name terminator {}", marker)
            }
            DnameErrorEnum::TrailingData => f.write_str("trailing data"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DnameError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::cmp::Ordering;
    use rstest::rstest;
    use std::string::ToString;

    fn name(s: &str) -> DnameBuf {
        DnameBuf::from_text(s.as_bytes()).unwrap()
    }

    #[test]
    fn root() {
        assert_eq!(Dname::root_ref().as_slice(), b"\x01\x00");
        assert_eq!(Dname::root_vec().as_slice(), b"\x01\x00");
        assert_eq!(Dname::root_slice().as_slice(), b"\x01\x00");
        assert!(Dname::root_slice().is_root());
        assert!(Dname::root_slice().is_complete());
        assert_eq!(Dname::root_slice().label_count(), 0);
    }

    #[cfg(feature = "bytes")]
    #[test]
    fn root_bytes() {
        assert_eq!(Dname::root_bytes().as_slice(), b"\x01\x00");
    }

    #[rstest]
    #[case(b"\x01\x00", Status::Complete)]
    #[case(b"\x01\xff", Status::Staged)]
    #[case(b"\x05\x03com\x00", Status::Complete)]
    #[case(b"\x05\x03www\xff", Status::Staged)]
    #[case(b"\x07\x01a\x03com\x00", Status::Complete)]
    #[case(b"\x07\x01a\x03com\x00trailing", Status::Complete)]
    fn check_slice_good(#[case] slice: &[u8], #[case] status: Status) {
        assert_eq!(Dname::check_slice(slice), Ok(status));
    }

    #[rstest]
    #[case(b"", DnameErrorEnum::ShortBuf)]
    #[case(b"\x00", DnameErrorEnum::EmptyName)]
    #[case(b"\x05\x03com", DnameErrorEnum::ShortBuf)]
    #[case(b"\x01\x01", DnameErrorEnum::BadTerminator(1))]
    #[case(b"\x01\x40", DnameErrorEnum::BadTerminator(0x40))]
    #[case(b"\x05\x03com\x07", DnameErrorEnum::BadTerminator(7))]
    #[case(b"\x04\x03com", DnameErrorEnum::ShortInput)]
    #[case(b"\x04\x04com", DnameErrorEnum::ShortInput)]
    #[case(b"\x03\x00\x01\x00", DnameErrorEnum::EmbeddedRoot)]
    #[case(b"\x03\x40ab", DnameErrorEnum::BadLabel(0x40))]
    #[case(b"\x03\xffab", DnameErrorEnum::BadLabel(0xff))]
    #[case(b"\x03\xc0\x01\x00", DnameErrorEnum::BadLabel(0xc0))]
    fn check_slice_bad(#[case] slice: &[u8], #[case] err: DnameErrorEnum) {
        assert_eq!(Dname::check_slice(slice), Err(DnameError(err)));
    }

    #[test]
    fn check_slice_respects_capacity() {
        // A valid name, but the declared capacity cuts it short.
        let buf = b"\x07\x01a\x03com\x00";
        for cap in 0..buf.len() {
            assert!(Dname::check_slice(&buf[..cap]).is_err());
        }
        assert!(Dname::check_slice(&buf[..]).is_ok());
    }

    #[test]
    fn check_slice_arbitrary_input() {
        for a in 0..=u8::MAX {
            // A lone terminator.
            assert_eq!(
                Dname::check_slice(&[1, a]).ok(),
                Status::from_marker(a)
            );
            for b in 0..=u8::MAX {
                // Two octets can’t hold a label and a terminator.
                assert!(Dname::check_slice(&[2, a, b]).is_err());
                // Capacity too small for L = 3.
                assert!(Dname::check_slice(&[3, a, b]).is_err());
                // One octet label followed by a terminator.
                assert_eq!(
                    Dname::check_slice(&[3, 1, a, b]).ok(),
                    Status::from_marker(b)
                );
                // The first octet as a label length.
                let expected = match a {
                    1 => Status::from_marker(b),
                    _ => None,
                };
                assert_eq!(
                    Dname::check_slice(&[3, a, b'x', b]).ok(),
                    expected
                );
            }
        }
    }

    #[test]
    fn from_octets_and_slice() {
        assert!(Dname::from_octets(&b"\x05\x03www\xff"[..]).is_ok());
        assert_eq!(
            Dname::from_octets(&b"\x05\x03www\xffx"[..]),
            Err(DnameError(DnameErrorEnum::TrailingData))
        );
        let name = Dname::from_slice(b"\x05\x03www\xffx").unwrap();
        assert_eq!(name.as_slice(), b"\x05\x03www\xff");
        assert_eq!(name.len(), 6);
        assert_eq!(name.payload_len(), 5);
        assert_eq!(name.payload(), b"\x03www\xff");
    }

    #[test]
    fn status() {
        assert_eq!(name("www").status(), Status::Staged);
        assert!(name("www").is_staged());
        assert_eq!(name("www.").status(), Status::Complete);
        assert!(name("www.").is_complete());
        assert_eq!(Status::from_marker(0), Some(Status::Complete));
        assert_eq!(Status::from_marker(255), Some(Status::Staged));
        assert_eq!(Status::from_marker(3), None);
        assert_eq!(Status::Staged.marker(), 255);
    }

    #[test]
    fn iter() {
        let n = name("www.example.com.");
        let labels: Vec<_> = n.iter().map(Label::as_slice).collect();
        assert_eq!(labels, [&b"www"[..], b"example", b"com"]);
        assert_eq!(n.label_count(), 3);
        assert_eq!(n.first().unwrap().as_slice(), b"www");

        let n = name("www.example");
        assert_eq!(n.label_count(), 2);
    }

    #[rstest]
    #[case("a.com.", "a.com.", true)]
    #[case("a.com.", "www.a.com.", true)]
    #[case("a.com.", "x.y.z.a.com.", true)]
    #[case("a.com.", "wwwa.com.", false)]
    #[case("a.com.", "com.", false)]
    #[case("a.com.", "a.org.", false)]
    #[case(".", "anything.example.", true)]
    #[case(".", ".", true)]
    #[case("com.", "\\003com.", false)]
    fn is_in_zone(
        #[case] zone: &str,
        #[case] child: &str,
        #[case] res: bool,
    ) {
        assert_eq!(name(child).is_in_zone(&*name(zone)), res);
    }

    #[test]
    fn is_wildcard() {
        assert!(name("*.example.com.").is_wildcard());
        assert!(name("*").is_wildcard());
        assert!(!name("notawild.example.com.").is_wildcard());
        assert!(!name("**.example.com.").is_wildcard());
        assert!(!name("a.*.example.com.").is_wildcard());
        assert!(!Dname::root_slice().is_wildcard());
        assert!(!Dname::from_slice(b"\x01\xff").unwrap().is_wildcard());
    }

    #[test]
    fn cmp() {
        // Shorter first, then by octets.
        let names = [
            name("."),
            name("z."),
            name("aa."),
            name("ab."),
            name("a.b."),
            name("www.example.com."),
        ];
        for i in 0..names.len() {
            for j in 0..names.len() {
                let ord = i.cmp(&j);
                assert_eq!(names[i].partial_cmp(&names[j]), Some(ord));
                assert_eq!(names[i].cmp(&names[j]), ord);
            }
        }

        // Complete and staged never compare equal.
        assert_ne!(name("www").cmp(&name("www.")), Ordering::Equal);
        assert_ne!(name("www"), name("www."));
        assert_eq!(name("www").cmp(&name("www")), Ordering::Equal);

        // Across octets types.
        assert_eq!(name("a.com.").to_vec(), *name("a.com."));
    }

    #[test]
    fn hash() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut s1 = DefaultHasher::new();
        let mut s2 = DefaultHasher::new();
        name("example.com.").hash(&mut s1);
        name("EXAMPLE.com.").to_vec().hash(&mut s2);
        assert_eq!(s1.finish(), s2.finish());
    }

    #[test]
    fn terminate() {
        let mut n = name("www").to_vec();
        assert!(n.is_staged());
        n.terminate();
        assert!(n.is_complete());
        assert_eq!(n.as_slice(), b"\x05\x03www\x00");
        n.terminate();
        assert_eq!(n.as_slice(), b"\x05\x03www\x00");
    }

    #[test]
    fn to_octets() {
        let n = name("www.example.com.");
        let trimmed: Dname<Vec<u8>> = n.to_octets().unwrap();
        assert_eq!(trimmed.as_octets().len(), 18);
        assert_eq!(trimmed, *n);
        assert_eq!(trimmed.to_buf(), n);
    }

    #[rstest]
    #[case("www.example.com.", "www.example.com.")]
    #[case("WWW.Example.COM", "www.example.com")]
    #[case(".", ".")]
    #[case("a", "a")]
    #[case("a\\.b.c.", "a.b.c.")]
    fn compose_text(#[case] input: &str, #[case] text: &str) {
        assert_eq!(name(input).to_text_vec(), text.as_bytes());
    }

    #[test]
    fn compose_text_empty_staged() {
        let n = Dname::from_slice(b"\x01\xff").unwrap();
        assert_eq!(n.to_text_vec(), b"");
    }

    #[rstest]
    #[case("www.example.com.", "www.example.com.")]
    #[case("www", "www")]
    #[case(".", ".")]
    #[case("a\\.b.c.", "a\\.b.c.")]
    #[case("\\000x\\255.", "\\000x\\255.")]
    fn display(#[case] input: &str, #[case] text: &str) {
        assert_eq!(name(input).to_string(), text);
    }

    #[test]
    fn display_reencodes() {
        let n = Dname::from_slice(b"\x04\x02AB\x00").unwrap();
        assert_eq!(n.to_string(), "\\065\\066.");
        assert_eq!(name(&n.to_string()).as_slice(), n.as_slice());

        // Any single octet label, complete and staged.
        for ch in 0..=u8::MAX {
            for marker in [Status::COMPLETE_MARKER, Status::STAGED_MARKER] {
                let octets = [3, 1, ch, marker];
                let n = Dname::from_slice(&octets).unwrap();
                assert_eq!(name(&n.to_string()).as_slice(), n.as_slice());
            }
        }
    }

    #[test]
    fn display_empty_staged() {
        let n = Dname::from_slice(b"\x01\xff").unwrap();
        assert_eq!(n.to_string(), "");
        assert!(DnameBuf::from_text(n.to_string().as_bytes()).is_err());
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", name("a.com.").to_vec()), "Dname(a.com.)");
    }

    #[cfg(all(feature = "serde", feature = "std"))]
    #[test]
    fn ser_de() {
        use serde_test::{assert_tokens, Configure, Token};

        let n = name("www.example.com.").to_vec();
        assert_tokens(
            &n.clone().compact(),
            &[
                Token::NewtypeStruct { name: "Dname" },
                Token::ByteBuf(b"\x11\x03www\x07example\x03com\0"),
            ],
        );
        assert_tokens(
            &n.readable(),
            &[
                Token::NewtypeStruct { name: "Dname" },
                Token::Str("www.example.com."),
            ],
        );
        assert_tokens(
            &name("www").to_vec().readable(),
            &[Token::NewtypeStruct { name: "Dname" }, Token::Str("www")],
        );
        assert_tokens(
            &Dname::root_vec().readable(),
            &[Token::NewtypeStruct { name: "Dname" }, Token::Str(".")],
        );
    }

    #[cfg(all(feature = "serde", feature = "std"))]
    #[test]
    fn ser_de_escaped() {
        use serde_test::{
            assert_ser_tokens_error, assert_tokens, Configure, Token,
        };

        let upper = Dname::from_octets(Vec::from(&b"\x04\x02AB\x00"[..]))
            .unwrap();
        assert_tokens(
            &upper.readable(),
            &[
                Token::NewtypeStruct { name: "Dname" },
                Token::Str("\\065\\066."),
            ],
        );

        let empty = Dname::from_octets(Vec::from(&b"\x01\xff"[..])).unwrap();
        assert_ser_tokens_error(
            &empty.clone().readable(),
            &[],
            "staged name without labels has no text form",
        );
        assert_tokens(
            &empty.compact(),
            &[
                Token::NewtypeStruct { name: "Dname" },
                Token::ByteBuf(b"\x01\xff"),
            ],
        );
    }
}
