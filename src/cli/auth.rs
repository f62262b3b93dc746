use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{spotify, types::PkceToken};

/// Entry point for `xmsync auth`; the whole flow lives in the spotify
/// module, this layer only owns the shared callback state.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    spotify::auth::auth(shared_state).await;
}
