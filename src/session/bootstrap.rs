use crate::session::{client::SessionClient, state::SessionState};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// One-shot startup step: a single silent refresh so a returning user holding
/// a valid refresh cookie is authenticated before the first navigation.
///
/// Repeated or concurrent calls share the first outcome and never issue a
/// second refresh.
pub struct Bootstrapper {
    client: Arc<SessionClient>,
    outcome: OnceCell<bool>,
}

impl Bootstrapper {
    #[must_use]
    pub fn new(client: Arc<SessionClient>) -> Self {
        Self {
            client,
            outcome: OnceCell::new(),
        }
    }

    /// Settles the session and reports whether it ended `Authenticated`.
    pub async fn run(&self) -> bool {
        *self
            .outcome
            .get_or_init(|| async {
                let authenticated = if self.client.silent_refresh().await {
                    true
                } else {
                    self.settled_state().await.is_authenticated()
                };
                info!(authenticated, "session bootstrap complete");
                authenticated
            })
            .await
    }

    /// Whether the bootstrap already ran; `None` until it has.
    #[must_use]
    pub fn outcome(&self) -> Option<bool> {
        self.outcome.get().copied()
    }

    /// First state past `Unknown`. Only waits when another refresh was
    /// already in flight and this call skipped the network.
    async fn settled_state(&self) -> SessionState {
        let mut subscription = self.client.store().observe();
        while let Some(state) = subscription.recv().await {
            if state != SessionState::Unknown {
                return state;
            }
            debug!("waiting for in-flight refresh to settle");
        }
        SessionState::Anonymous
    }
}
