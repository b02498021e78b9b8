pub mod gray;
pub mod pixel;
