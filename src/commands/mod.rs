pub mod add;
pub mod complete;
pub mod delete;
pub mod init;
pub mod list;
pub mod status;
pub mod update;
