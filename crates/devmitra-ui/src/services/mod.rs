//! Browser services: the HTTP gateway and readers for server-rendered markup.

pub(crate) mod api;
pub(crate) mod dom;
