pub(crate) mod board;
pub mod hooks;
pub mod ui;
