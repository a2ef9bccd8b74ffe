// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::oneshot;

use crate::auth::User;
use crate::core::{error::Error, events::Event, info::SessionInfo};

#[derive(Debug)]
pub enum ManagerMsg {
    Event(Event),

    GetInfo {
        reply: oneshot::Sender<SessionInfo>,
    },

    Extend {
        reply: oneshot::Sender<Result<(), Error>>,
    },

    Logout {
        reply: oneshot::Sender<Result<(), Error>>,
    },

    SetUser {
        user: Option<User>,
        reply: oneshot::Sender<()>,
    },

    Teardown {
        reply: oneshot::Sender<()>,
    },
}
