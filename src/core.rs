pub mod document;
pub mod parser;
pub mod resolver;
mod slot;
pub mod window;
mod wire;

pub use self::{
    document::PriceDocument,
    parser::parse_document,
    resolver::{CurrentPrice, resolve_current},
    slot::TimeSlot,
    window::{PriceWindow, compute_window},
};
