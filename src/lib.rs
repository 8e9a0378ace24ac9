//! A single-user to-do list kept in a flat `tasks.txt` file.

pub mod config;
pub mod error;
pub mod id;
pub mod signals;
pub mod store;
pub mod task;
pub mod task_list;
pub mod ui;
