pub mod add;
pub mod branch;
pub mod commit;
pub mod init;
pub mod push;
