// linepatch - replace a 1-based line range in a text file, keeping its
// newline style and trailing newline, and skipping the write when nothing changed

pub mod config;
pub mod diff;
pub mod encoding;
pub mod error;
pub mod logging;
pub mod patch;
pub mod text;

pub use encoding::TextEncoding;
pub use error::{PatchError, PatchResult};
pub use patch::{
    apply_range_replacement, apply_range_replacement_sync, patch_text, plan_range_replacement,
    plan_range_replacement_sync, PatchOptions, PatchOutcome, PatchPlan, Replacement,
};
pub use text::{decompose, recompose, replace, LineRange, NewlineStyle, SplitText};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
