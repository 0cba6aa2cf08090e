pub mod catalog;
pub mod daily;
pub mod game;
pub mod scorer;
pub mod session;
