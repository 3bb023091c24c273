//! Command implementations

mod edit;
mod show;

pub use edit::{run_add, run_remove, run_set, run_unset};
pub use show::{run_copy, run_get, run_list, run_show};
