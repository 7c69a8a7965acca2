pub mod timestamp;
pub mod tstz_span;
pub mod tstz_span_set;

pub use timestamp::Timestamp;
pub use tstz_span::TsTzSpan;
pub use tstz_span_set::TsTzSpanSet;
