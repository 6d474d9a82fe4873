pub mod frame;
pub mod raw_return;

pub use frame::{label_frame, numeric_columns, FrameOutcome};
pub use raw_return::{label, raw_returns, Diagnostic, LabelOutcome, RawReturnLabeler};
