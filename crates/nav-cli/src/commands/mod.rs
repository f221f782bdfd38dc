pub mod carry;
pub mod changelog;
pub mod dispatch;
pub mod related;
