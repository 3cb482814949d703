//! Domain name labels.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use core::{cmp, fmt, mem};

//------------ Label ---------------------------------------------------------

/// The content of a single label of a name.
///
/// A `Label` is an unsized view of the octets between one length octet of
/// an encoded name and the next. It never includes the length octet itself.
/// It is obtained by walking a name via [`Dname::iter`][super::Dname::iter]
/// or by splitting the encoded form with [`Label::split_from`].
///
/// Labels taken from a name have between 1 and 63 octets. Only
/// `split_from` can produce the empty label, when it meets a zero length
/// octet.
///
/// Labels compare octet by octet. Text is folded to lower case when names
/// are encoded, so ASCII case is not ignored here.
#[repr(transparent)]
pub struct Label([u8]);

impl Label {
    /// The maximum number of content octets of a label.
    pub const MAX_LEN: usize = 63;

    /// Creates a label atop a slice without checking its length.
    ///
    /// # Safety
    ///
    /// The `slice` must be at most 63 octets long.
    pub(super) unsafe fn from_slice_unchecked(slice: &[u8]) -> &Self {
        // SAFETY: Label has repr(transparent)
        mem::transmute(slice)
    }

    /// Creates a label from its content octets.
    pub fn from_slice(slice: &[u8]) -> Result<&Self, LongLabelError> {
        if slice.len() > Self::MAX_LEN {
            return Err(LongLabelError(()));
        }
        Ok(unsafe { Self::from_slice_unchecked(slice) })
    }

    /// Takes the first label off an encoded sequence of labels.
    ///
    /// `slice` has to start with a length octet. Returns the label and
    /// whatever follows it. A length octet above 63 is rejected, which also
    /// covers the staged terminator and compression pointers.
    pub fn split_from(
        slice: &[u8],
    ) -> Result<(&Self, &[u8]), SplitLabelError> {
        let (&len, rest) =
            slice.split_first().ok_or(SplitLabelError::ShortInput)?;
        if usize::from(len) > Self::MAX_LEN {
            return Err(SplitLabelError::BadLength(len));
        }
        if rest.len() < usize::from(len) {
            return Err(SplitLabelError::ShortInput);
        }
        let (content, tail) = rest.split_at(usize::from(len));
        Ok((unsafe { Self::from_slice_unchecked(content) }, tail))
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns the number of content octets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether this is the empty label.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether this is the wildcard label `*`.
    pub fn is_wildcard(&self) -> bool {
        self.0 == *b"*"
    }

    /// Compares two labels the same way names are compared.
    ///
    /// The shorter label sorts first, labels of equal length by their
    /// octets.
    pub fn composed_cmp(&self, other: &Self) -> cmp::Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

//--- AsRef

impl AsRef<[u8]> for Label {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

//--- PartialEq, Eq, PartialOrd, and Ord

impl<T: AsRef<[u8]> + ?Sized> PartialEq<T> for Label {
    fn eq(&self, other: &T) -> bool {
        self.0 == *other.as_ref()
    }
}

impl Eq for Label {}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.composed_cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.composed_cmp(other)
    }
}

//--- Display and Debug

impl fmt::Display for Label {
    /// Writes the label in escaped text form.
    ///
    /// Separators, backslashes and spaces get a simple escape. Upper case
    /// letters, control characters and non-ASCII octets get a decimal
    /// escape, so that encoding the text again yields the same octets
    /// despite case folding.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &ch in &self.0 {
            match ch {
                b'.' | b'\\' | b' ' => write!(f, "\\{}", char::from(ch))?,
                b'A'..=b'Z' | 0x00..=0x1F | 0x7F..=0xFF => {
                    write!(f, "\\{:03}", ch)?
                }
                _ => write!(f, "{}", char::from(ch))?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Label({})", self)
    }
}

//============ Error Types ===================================================

//------------ LongLabelError ------------------------------------------------

/// A label was longer than the allowed 63 octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongLabelError(());

//--- Display and Error

impl fmt::Display for LongLabelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("long label")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LongLabelError {}

//------------ SplitLabelError -----------------------------------------------

/// A label could not be taken off an encoded name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SplitLabelError {
    /// The length octet was above 63.
    BadLength(u8),

    /// The octets ended before the label did.
    ShortInput,
}

//--- Display and Error

impl fmt::Display for SplitLabelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SplitLabelError::BadLength(len) => {
                write!(f, "invalid label length {}", len)
            }
            SplitLabelError::ShortInput => {
                f.write_str("unexpected end of input")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SplitLabelError {}

//============ Testing =======================================================
