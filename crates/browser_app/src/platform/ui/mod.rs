pub mod input;
pub mod render;
mod terminal;

pub use terminal::Terminal;
