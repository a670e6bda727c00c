pub mod correlation;

pub use correlation::{CORRELATION_ID_HEADER, CorrelationId, correlation_span};
