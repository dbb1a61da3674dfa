pub mod dtw;

pub use dtw::{align, Alignment};
