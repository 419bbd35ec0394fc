//! Extension traits

mod depot;
mod id;
mod result;
mod timestamp;

pub(crate) use depot::DepotExt as _;
pub(crate) use id::PathIdExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use timestamp::TimestampExt as _;
