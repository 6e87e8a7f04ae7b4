//! Gene lookup adapters for the NTR analyzer
//!
//! Two independent adapters translate a gene symbol (plus optional
//! organism) into a normalized [`ntr_model::GeneRecord`]:
//! - [`HgncAdapter`] queries genenames.org for human genes; a 404 is a
//!   normal empty result, not a failure.
//! - [`NcbiAdapter`] runs two sequential E-utilities calls (esearch, then
//!   esummary) for non-human organisms.
//!
//! Both are plain request/response with no retry: a transient network
//! failure propagates as [`LookupError`] to the caller. "Queried, not
//! found" is `Ok(None)`.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod directory;
pub mod error;
pub mod hgnc;
pub mod ncbi;

pub use directory::{GeneDirectory, RestGeneDirectory};
pub use error::LookupError;
pub use hgnc::{HgncAdapter, DEFAULT_HGNC_BASE};
pub use ncbi::{NcbiAdapter, DEFAULT_EUTILS_BASE};
