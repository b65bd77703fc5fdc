//! Session change notification.

pub mod bus;
