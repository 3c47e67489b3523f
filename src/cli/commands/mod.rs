pub mod compile;
pub mod extract;
pub mod init;
