pub mod context;
pub mod managers;
pub mod msg;

pub use context::AppContext;
pub use msg::Msg;

use std::sync::mpsc::Sender;

/// Sends `msg` to the presentation layer. A receiver that went away is not an
/// error for the sender: the event is dropped and logged.
pub(crate) fn notify(tx: &Sender<Msg>, msg: Msg) {
    if let Err(e) = tx.send(msg) {
        log::debug!("Dropping event, receiver is gone: {:?}", e.0);
    }
}
