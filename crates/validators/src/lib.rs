// validators crate

mod cards;
mod hdus;
mod header;
mod policy;
mod verify;

pub use header::VALID_BITPIX;
pub use policy::{run_option, Issue, DEFAULT_FIX_TEXT, UNFIXABLE_PREFIX};
pub use verify::{verify, verify_with, LogSink, Verify, WarningSink, BANNER, INDEXING_NOTE};
