pub mod build;
pub mod entry_get;
pub mod entry_list;
pub mod entry_search;
pub mod stub;
pub mod validate;

mod output;
