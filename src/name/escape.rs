//! Zonefile escape sequences.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.
//!
//! In the presentation format, a label octet can be given in one of three
//! ways: as the octet itself, as a backslash followed by a single character
//! that is not a decimal digit (a *simple escape*, which strips the
//! character of any special meaning such as being a label separator), or as
//! a backslash followed by exactly three decimal digits giving the octet’s
//! value (a *decimal escape*).

use core::fmt;

//------------ Symbol --------------------------------------------------------

/// The presentation-format representation of a single octet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Symbol {
    /// An unescaped octet.
    Char(u8),

    /// An octet escaped via a preceding backslash.
    SimpleEscape(u8),

    /// A raw octet escaped using the decimal escape sequence.
    ///
    /// This escape sequence consists of a backslash followed by exactly three
    /// decimal digits with the value of the octet.
    DecimalEscape(u8),
}

impl Symbol {
    /// Reads a symbol from the given position in an octets slice.
    ///
    /// Returns the symbol and the index of the end of the symbol in the
    /// slice, `Ok(None)` if `pos` is at the end of the slice, or an error if
    /// there is a dangling or malformed escape sequence at `pos`.
    pub fn from_slice_index(
        octets: &[u8],
        pos: usize,
    ) -> Result<Option<(Symbol, usize)>, SymbolError> {
        let c1 = match octets.get(pos) {
            Some(c1) => *c1,
            None => return Ok(None),
        };
        let pos = pos + 1;

        if c1 != b'\\' {
            return Ok(Some((Symbol::Char(c1), pos)));
        }

        let c2 = match octets.get(pos) {
            Some(c2) => *c2,
            None => return Err(SymbolError::ShortInput),
        };
        let pos = pos + 1;
        if !c2.is_ascii_digit() {
            return Ok(Some((Symbol::SimpleEscape(c2), pos)));
        }

        // Two more digits.
        let c3 = match octets.get(pos) {
            Some(c) if c.is_ascii_digit() => *c,
            Some(_) => return Err(SymbolError::BadEscape),
            None => return Err(SymbolError::ShortInput),
        };
        let c4 = match octets.get(pos + 1) {
            Some(c) if c.is_ascii_digit() => *c,
            Some(_) => return Err(SymbolError::BadEscape),
            None => return Err(SymbolError::ShortInput),
        };

        let value = (u32::from(c2 - b'0') * 100)
            + (u32::from(c3 - b'0') * 10)
            + u32::from(c4 - b'0');
        let value = u8::try_from(value).map_err(|_| SymbolError::BadEscape)?;
        Ok(Some((Symbol::DecimalEscape(value), pos + 2)))
    }

    /// Returns the octet this symbol represents.
    #[must_use]
    pub fn into_octet(self) -> u8 {
        match self {
            Symbol::Char(ch)
            | Symbol::SimpleEscape(ch)
            | Symbol::DecimalEscape(ch) => ch,
        }
    }

    /// Returns whether the symbol is an unescaped label separator.
    #[must_use]
    pub fn is_separator(self) -> bool {
        self == Symbol::Char(b'.')
    }
}

//--- Display

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Symbol::Char(ch) => write!(f, "{}", ch as char),
            Symbol::SimpleEscape(ch) => write!(f, "\\{}", ch as char),
            Symbol::DecimalEscape(ch) => write!(f, "\\{:03}", ch),
        }
    }
}

//------------ Symbols -------------------------------------------------------

/// An iterator over the symbols in an octets slice.
///
/// The iterator stops at the end of the slice or at the first malformed
/// escape sequence. In the latter case, [`Symbols::error`] returns the
/// error afterwards.
#[derive(Clone, Debug)]
pub struct Symbols<'a> {
    /// The presentation-format text.
    octets: &'a [u8],

    /// The position of the next symbol.
    pos: usize,

    /// The error that fused the iterator, if any.
    err: Option<SymbolError>,
}

impl<'a> Symbols<'a> {
    /// Creates a new symbols iterator atop an octets slice.
    #[must_use]
    pub fn new(octets: &'a [u8]) -> Self {
        Symbols {
            octets,
            pos: 0,
            err: None,
        }
    }

    /// Returns the error that ended the iteration, if there was one.
    #[must_use]
    pub fn error(&self) -> Option<SymbolError> {
        self.err
    }
}

impl<'a> Iterator for Symbols<'a> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        if self.err.is_some() {
            return None;
        }
        match Symbol::from_slice_index(self.octets, self.pos) {
            Ok(Some((symbol, pos))) => {
                self.pos = pos;
                Some(symbol)
            }
            Ok(None) => None,
            Err(err) => {
                self.err = Some(err);
                None
            }
        }
    }
}

//------------ unescape ------------------------------------------------------

/// Decodes the escape sequences in `input` into `out`.
///
/// Returns the number of octets written. Since every escape sequence
/// represents exactly one octet, this is never more than `input.len()`.
///
/// # Panics
///
/// Panics if `out` is shorter than `input`.
pub fn try_unescape(out: &mut [u8], input: &[u8]) -> Result<usize, SymbolError> {
    assert!(
        out.len() >= input.len(),
        "unescape output shorter than input"
    );
    let mut symbols = Symbols::new(input);
    let mut len = 0;
    for symbol in symbols.by_ref() {
        out[len] = symbol.into_octet();
        len += 1;
    }
    match symbols.error() {
        Some(err) => Err(err),
        None => Ok(len),
    }
}

/// Decodes the escape sequences in `input` into `out`.
///
/// This is [`try_unescape`] with the error folded into the return value:
/// a dangling or malformed escape sequence results in a length of zero.
/// Because `input` must not be empty, a successful decode never returns
/// zero.
///
/// # Panics
///
/// Panics if `input` is empty or `out` is shorter than `input`.
pub fn unescape(out: &mut [u8], input: &[u8]) -> usize {
    assert!(!input.is_empty(), "cannot unescape empty input");
    try_unescape(out, input).unwrap_or(0)
}

//============ Error Types ===================================================

//------------ SymbolError ---------------------------------------------------

/// An error happened when reading a symbol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SymbolError {
    /// An illegal escape sequence was encountered.
    ///
    /// This is a non-digit inside a decimal escape or a decimal escape with
    /// a value above 255.
    BadEscape,

    /// The input ended inside an escape sequence.
    ShortInput,
}

//--- Display and Error

impl fmt::Display for SymbolError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SymbolError::BadEscape => f.write_str("illegal escape sequence"),
            SymbolError::ShortInput => {
                f.write_str("unexpected end of input")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SymbolError {}

//============ Testing =======================================================
