pub mod chain;
pub mod layouts;
pub mod render;
