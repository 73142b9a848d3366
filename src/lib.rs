//! Compare revision sets between two SVN branches, using the `svn`
//! command-line tool as the engine of record.

pub mod config;
pub mod differ;
pub mod error;
pub mod pager;
pub mod summary;
pub mod svn;
