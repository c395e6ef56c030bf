pub mod ask_form;

pub use ask_form::{AskForm, SourceLink};
