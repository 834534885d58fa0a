//! Bidirectional lookup between [`Symbology`] and an engine's native formats.

use crate::Symbology;
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A format identifier as reported by a native recognition engine.
pub trait NativeFormat: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// The engine's own name for the format, used as the result note when
    /// the format has no [`Symbology`] counterpart.
    fn label(&self) -> &str;
}

/// Invalid static format tables.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatTableError {
    #[error("symbology {0} appears more than once")]
    DuplicateSymbology(Symbology),
    #[error("native format {0} appears more than once")]
    DuplicateNative(String),
    #[error("`unknown` cannot be mapped to a native format")]
    UnknownMapped,
}

/// Set of native formats an engine should look for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatRestriction<N> {
    /// No restriction; the engine recognizes everything it supports.
    All,
    /// Only the listed formats, in configuration order.
    Only(Vec<N>),
}

impl<N: PartialEq> FormatRestriction<N> {
    #[inline]
    pub fn is_restricted(&self) -> bool {
        matches!(self, FormatRestriction::Only(_))
    }

    /// Restricted format list, or `None` when unrestricted.
    pub fn formats(&self) -> Option<&[N]> {
        match self {
            FormatRestriction::All => None,
            FormatRestriction::Only(formats) => Some(formats),
        }
    }

    pub fn allows(&self, native: &N) -> bool {
        match self {
            FormatRestriction::All => true,
            FormatRestriction::Only(formats) => formats.contains(native),
        }
    }
}

/// Bidirectional format table built once per engine.
#[derive(Clone, Debug)]
pub struct FormatMapper<N: NativeFormat> {
    to_native: HashMap<Symbology, N>,
    from_native: HashMap<N, Symbology>,
}

impl<N: NativeFormat> FormatMapper<N> {
    /// Build a mapper from a static pair table.
    ///
    /// Every symbology and every native format may appear at most once, and
    /// `Symbology::Unknown` may not appear at all.
    pub fn new(table: &[(Symbology, N)]) -> Result<Self, FormatTableError> {
        let mut to_native = HashMap::with_capacity(table.len());
        let mut from_native = HashMap::with_capacity(table.len());
        for (symbology, native) in table {
            if symbology.is_unknown() {
                return Err(FormatTableError::UnknownMapped);
            }
            if to_native.insert(*symbology, native.clone()).is_some() {
                return Err(FormatTableError::DuplicateSymbology(*symbology));
            }
            if from_native.insert(native.clone(), *symbology).is_some() {
                return Err(FormatTableError::DuplicateNative(native.label().to_owned()));
            }
        }
        Ok(Self {
            to_native,
            from_native,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.to_native.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.to_native.is_empty()
    }

    #[inline]
    pub fn to_native(&self, symbology: Symbology) -> Option<&N> {
        self.to_native.get(&symbology)
    }

    /// Map a native format back; formats outside the table are `Unknown`.
    #[inline]
    pub fn from_native(&self, native: &N) -> Symbology {
        self.from_native
            .get(native)
            .copied()
            .unwrap_or(Symbology::Unknown)
    }

    /// Map a detected format to `(symbology, note)`.
    ///
    /// The note is the native label when the format is unmapped and empty
    /// otherwise.
    pub fn resolve(&self, native: &N) -> (Symbology, String) {
        match self.from_native.get(native) {
            Some(symbology) => (*symbology, String::new()),
            None => {
                debug!("native format {} has no symbology", native.label());
                (Symbology::Unknown, native.label().to_owned())
            }
        }
    }

    /// Translate a restriction list into native formats.
    ///
    /// Entries without a native counterpart are skipped with a log line. If
    /// nothing maps, the result is [`FormatRestriction::All`].
    pub fn restrict(&self, symbologies: &[Symbology]) -> FormatRestriction<N> {
        let mut natives: Vec<N> = Vec::with_capacity(symbologies.len());
        for symbology in symbologies {
            match self.to_native.get(symbology) {
                Some(native) if !natives.contains(native) => natives.push(native.clone()),
                Some(_) => {}
                None => warn!("restricted format {symbology} is not supported by this engine, skipping"),
            }
        }
        if natives.is_empty() {
            if !symbologies.is_empty() {
                warn!("no restricted format is supported by this engine, scanning all formats");
            }
            FormatRestriction::All
        } else {
            FormatRestriction::Only(natives)
        }
    }
}
