//! Domain types: dates, tenors and payment frequencies.

mod date;
mod frequency;
mod tenor;

pub use date::Date;
pub use frequency::Frequency;
pub use tenor::{Tenor, TenorUnit};

pub(crate) use date::days_in_month;
