pub mod add;
pub mod column;
pub mod edit;
pub mod r#move;
pub mod preset;
pub mod sweep;
pub mod window;
