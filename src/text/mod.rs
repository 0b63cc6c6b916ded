pub mod lines;
pub mod range;

pub use lines::{decompose, recompose, NewlineStyle, SplitText};
pub use range::{parse_line_number, replace, replace_range, LineRange};
