pub mod block;
pub mod wrap;
