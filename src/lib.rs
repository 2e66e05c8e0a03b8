pub mod accounting;
pub mod error;
pub mod ledger;
pub mod reader;
pub mod recipient;
pub mod splitter;
pub mod treasury;
pub mod writer;
