//! molcrew-annotate — Chemical-term annotation for lab monitor messages.
//!
//! Turns the free-text body of an agent message into displayable segments:
//! dictionary terms get definitions, property-value mentions get a
//! three-level status badge, and candidate structure notations are pulled
//! out for molecule rendering.

pub mod annotate;
pub mod classify;
pub mod ranges;
pub mod smiles;
pub mod terms;

pub use annotate::{Annotator, Segment};
pub use classify::{classify, PropertyStatus};
pub use ranges::{PropertyRange, RangeTable};
pub use smiles::SmilesExtractor;
pub use terms::TermDictionary;
