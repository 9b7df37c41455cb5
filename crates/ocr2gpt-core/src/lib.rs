pub mod log;
pub mod session;
pub mod shell;

pub use log::ResultLog;
pub use session::{Session, SessionError, SessionState};
pub use shell::{Shell, ShellUpdate};
