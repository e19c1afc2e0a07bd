//! Narration: the ordered output buffer and English wording helpers.

mod language;
mod output;

pub use language::{
    advantage, capitalize, degree, number_word, oxford_join, severity, spoonerize, Wording,
};
pub use output::{Message, NarrationSink, OutputBuffer};
