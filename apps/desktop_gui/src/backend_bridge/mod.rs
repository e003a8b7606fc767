//! Bridge between the UI thread and the serial link worker.

pub mod runtime;
