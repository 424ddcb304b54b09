pub mod composite;
pub mod compositor;
pub mod shadow;
pub mod text;
