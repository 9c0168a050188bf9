pub(crate) mod orders;
pub(crate) mod products;

use std::future::Future;

use shop_remote::{RemoteError, ShopEvent};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::drain;

/// Run one action to completion and return the events it emitted.
pub(crate) fn dispatch<F, Fut>(rt: &Runtime, action: F) -> Result<Vec<ShopEvent>, RemoteError>
where
    F: FnOnce(UnboundedSender<ShopEvent>) -> Fut,
    Fut: Future<Output = Result<(), RemoteError>>,
{
    let (tx, rx) = unbounded_channel();
    rt.block_on(action(tx))?;
    Ok(drain(rx))
}
