mod gracefullshutdown;
mod logs;
mod template;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::template::{EmailTemplate, EmailTemplateData, render_email};
