pub mod emit;
pub mod install;
pub mod logs;
pub mod session;
