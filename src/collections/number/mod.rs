pub mod float_span;
pub mod float_span_set;
pub mod int_span;
pub mod int_span_set;

pub use float_span::FloatSpan;
pub use float_span_set::FloatSpanSet;
pub use int_span::IntSpan;
pub use int_span_set::IntSpanSet;
