//! Owner names of zone records.
//!
//! When loading a zone, the owner names of its records are given in text
//! form, most of the time relative to the zone’s apex. Each of them has to
//! be encoded, completed by appending the apex, checked for actually
//! belonging to the zone, and possibly re-rooted at the apex for storing it
//! in the zone’s tree. The [`ZoneApex`] type bundles these steps.
//!
//! ```
//! use dname::zone::ZoneApex;
//!
//! let apex = ZoneApex::from_text(b"example.com.").unwrap();
//! let owner = apex.owner_from_text(b"www").unwrap();
//! assert_eq!(owner.to_string(), "www.example.com.");
//!
//! let relative = apex.relative_owner_from_text(b"www").unwrap();
//! assert_eq!(relative.to_string(), "www.");
//! assert!(apex.owner_from_text(b"www.example.org.").is_err());
//! ```

use crate::name::{Dname, DnameBuf, FromStrError, LongNameError, Status};
use std::fmt;
use std::vec::Vec;
use tracing::{debug, trace};

//------------ ZoneApex ------------------------------------------------------

/// The apex of a zone.
///
/// This is a complete name all owner names of the zone’s records are
/// relative to.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ZoneApex {
    /// The apex name.
    name: Dname<Vec<u8>>,
}

impl ZoneApex {
    /// Creates a new apex from a name.
    ///
    /// Returns an error if the name is staged.
    pub fn new<Octs>(name: &Dname<Octs>) -> Result<Self, ZoneError>
    where
        Octs: AsRef<[u8]> + ?Sized,
    {
        if name.is_staged() {
            return Err(ZoneError::NotComplete);
        }
        Ok(ZoneApex {
            name: name.to_vec(),
        })
    }

    /// Creates a new apex from its text form.
    ///
    /// The apex of a zone is always absolute, so a missing trailing dot is
    /// implied.
    pub fn from_text(text: &[u8]) -> Result<Self, ZoneError> {
        let mut name = DnameBuf::from_text(text)?;
        name.terminate();
        Ok(ZoneApex { name: name.trim() })
    }

    /// Returns the apex name.
    pub fn name(&self) -> &Dname<Vec<u8>> {
        &self.name
    }

    /// Returns whether `name` is at or below the apex.
    ///
    /// Staged names are never contained in a zone.
    pub fn contains<Octs>(&self, name: &Dname<Octs>) -> bool
    where
        Octs: AsRef<[u8]> + ?Sized,
    {
        name.is_complete() && name.is_in_zone(&self.name)
    }

    /// Builds the absolute owner name of a record from its text form.
    ///
    /// The text `@` stands for the apex itself. Relative names have the
    /// apex appended. Absolute names are taken as they are. In either case
    /// the resulting name must be within the zone.
    pub fn owner_from_text(&self, text: &[u8]) -> Result<DnameBuf, ZoneError> {
        if text == b"@" {
            return Ok(self.name.to_buf());
        }
        let mut owner = DnameBuf::from_text(text)?;
        if owner.is_staged() {
            match owner.cat(&self.name) {
                Ok(status) => debug_assert_eq!(status, Status::Complete),
                Err(err) => {
                    debug!(
                        "Rejecting owner {owner}: too long below {}",
                        self.name
                    );
                    return Err(err.into());
                }
            }
        } else if !self.contains(&*owner) {
            debug!("Rejecting owner {owner}: not within {}", self.name);
            return Err(ZoneError::OutOfZone);
        }
        trace!("Owner: {owner}");
        Ok(owner)
    }

    /// Builds the owner name of a record relative to the apex.
    ///
    /// This is [`owner_from_text`][Self::owner_from_text] with the apex
    /// removed again. The result is a complete name rooted at the apex,
    /// which is the form owners are stored in within a zone. The apex itself
    /// becomes the root name.
    pub fn relative_owner_from_text(
        &self,
        text: &[u8],
    ) -> Result<DnameBuf, ZoneError> {
        let mut owner = self.owner_from_text(text)?;
        owner.drop_zone(&self.name);
        trace!("Relative owner: {owner}");
        Ok(owner)
    }
}

//--- Display

impl fmt::Display for ZoneApex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

//============ Error Types ===================================================

//------------ ZoneError -----------------------------------------------------

/// An owner name could not be built.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ZoneError {
    /// The text form of a name was invalid.
    FromStr(FromStrError),

    /// Appending the apex made the name too long.
    LongName,

    /// The name is not at or below the apex.
    OutOfZone,

    /// A staged name was given where a complete one is needed.
    NotComplete,
}

//--- From

impl From<FromStrError> for ZoneError {
    fn from(err: FromStrError) -> Self {
        ZoneError::FromStr(err)
    }
}

impl From<LongNameError> for ZoneError {
    fn from(_: LongNameError) -> Self {
        ZoneError::LongName
    }
}

//--- Display and Error

impl fmt::Display for ZoneError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ZoneError::FromStr(err) => fmt::Display::fmt(&err, f),
            ZoneError::LongName => f.write_str("long domain name"),
            ZoneError::OutOfZone => f.write_str("name is out of zone"),
            ZoneError::NotComplete => f.write_str("name is not absolute"),
        }
    }
}

impl std::error::Error for ZoneError {}

//============ Testing =======================================================
