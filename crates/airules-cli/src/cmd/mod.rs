pub mod hooks;
pub mod init;
pub mod log;
pub mod registry;
pub mod scan;
pub mod state;
pub mod sync;
pub mod verify;
