//! Serving with a bounded graceful shutdown

use std::{
    future::{Future, IntoFuture},
    io,
    time::Duration,
};

use axum::Router;
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{info, warn};

/// How the server stopped once shutdown was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// Every in-flight request finished in time
    Drained,
    /// Connections were still open when the drain timeout ran out
    DeadlineElapsed,
}

/// Serve `app` until `signal` resolves, then give in-flight requests at most
/// `drain_timeout` to finish.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> io::Result<Shutdown>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel();
    let graceful = async move {
        signal.await;
        let _ = signalled_tx.send(());
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(graceful)
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result.map(|()| Shutdown::Drained),
        Ok(()) = signalled_rx => {},
    }

    info!("⏳ Waiting up to {:?} for connections to close...", drain_timeout);

    tokio::select! {
        result = &mut server => result.map(|()| Shutdown::Drained),
        () = tokio::time::sleep(drain_timeout) => {
            warn!(?drain_timeout, "Shutdown timeout elapsed with requests still in flight");
            Ok(Shutdown::DeadlineElapsed)
        },
    }
}
