use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use netprobe_common::network::target::{Target, TargetKind};
use netprobe_core::probe::{ProbeOutcome, Prober};
use tokio::net::TcpListener;

pub const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// A listener on an ephemeral loopback port.
pub async fn listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// A loopback port nothing listens on any more.
pub async fn closed_port() -> u16 {
    let (listener, port) = listener().await;
    drop(listener);
    port
}

/// Wraps a prober and counts how often it was asked.
pub struct Counting<P> {
    inner: P,
    pub calls: AtomicUsize,
}

impl<P: Prober> Counting<P> {
    pub fn new(inner: P) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<P: Prober> Prober for Counting<P> {
    fn accepts(&self) -> TargetKind {
        self.inner.accepts()
    }

    async fn probe(&self, target: Target) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.probe(target).await
    }
}
