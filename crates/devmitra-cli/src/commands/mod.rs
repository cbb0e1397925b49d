pub(crate) mod actions;
pub(crate) mod list;
