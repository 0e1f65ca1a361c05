pub mod export;
pub mod grade;
pub mod init;
pub mod validate;
