//! `StatusProvider`: the `get_status()`-shaped accessor every component
//! registered with the Heartbeat exposes (§4.5 step 1).

use crate::models::ComponentStatus;

pub trait StatusProvider: Send + Sync {
    fn get_status(&self) -> ComponentStatus;
}
