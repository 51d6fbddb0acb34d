//! Data models for casekit.
//!
//! Case values, the casebase container, and the read-only view contract.

mod casebase;
mod value;

pub use casebase::{CaseName, CaseView, Casebase};
pub use value::{Record, Value};
