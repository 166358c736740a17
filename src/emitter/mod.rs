//! Datasource document emitter (verb module)
//!
//! Walks a `DatasourceBuilder` and produces the final `<datasource>` tree,
//! plus the column-type table an extract writer needs.

mod assemble;
mod clock;
mod error;
mod extract;

pub use assemble::{assemble, render};
pub use clock::{Clock, FixedClock, SystemClock, UPDATE_TIME_FORMAT};
pub use error::EmitError;
pub use extract::infer_extract_columns;
