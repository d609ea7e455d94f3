pub mod create;
pub mod grade;
pub mod list;
pub mod modify;
pub mod show;
pub mod tabulate;
pub mod take;
pub mod validate;
