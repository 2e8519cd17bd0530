//! # Cart Client
//!
//! High-level API over the cart actor, used by both the menu (adds items) and checkout
//! (reads and edits lines, reads totals). Observers call [`CartClient::subscribe`].
use crate::cart_actor::{Cart, CartCreate, CartError, CartOutcome, SessionId};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient, ResourceEvent, WeakResourceClient};
use crate::model::{CartAction, CartState, ItemId, MenuItem};
use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, instrument, warn};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(session) => CartError::SessionNotFound(session),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CartClient {
    /// Opens an empty cart for a new customer session.
    #[instrument(skip(self))]
    pub async fn open_session(&self) -> Result<SessionId, CartError> {
        debug!("Sending request");
        self.inner.create(CartCreate).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, item), fields(item = %item.id))]
    pub async fn add_item(&self, session: SessionId, item: MenuItem) -> Result<CartOutcome, CartError> {
        self.apply(session, CartAction::Add(item)).await
    }

    /// Removing a line that is not in the cart is a no-op.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, session: SessionId, id: ItemId) -> Result<CartOutcome, CartError> {
        self.apply(session, CartAction::Remove(id)).await
    }

    /// Zero or a negative quantity removes the line. An id that is not in the cart leaves
    /// it untouched and answers [`Applied::Unchanged`](crate::model::Applied::Unchanged).
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        session: SessionId,
        id: ItemId,
        quantity: i64,
    ) -> Result<CartOutcome, CartError> {
        self.apply(session, CartAction::UpdateQuantity { id, quantity })
            .await
    }

    #[instrument(skip(self, note))]
    pub async fn set_note(
        &self,
        session: SessionId,
        id: ItemId,
        note: Option<String>,
    ) -> Result<CartOutcome, CartError> {
        self.apply(session, CartAction::SetNote { id, note }).await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, session: SessionId) -> Result<CartOutcome, CartError> {
        self.apply(session, CartAction::Clear).await
    }

    /// Current state of the session's cart.
    #[instrument(skip(self))]
    pub async fn snapshot(&self, session: SessionId) -> Result<CartState, CartError> {
        self.get(session)
            .await?
            .map(|cart| cart.state)
            .ok_or_else(|| CartError::SessionNotFound(session.to_string()))
    }

    /// Discards the session's cart.
    #[instrument(skip(self))]
    pub async fn close_session(&self, session: SessionId) -> Result<(), CartError> {
        self.delete(session).await
    }

    /// Watch one session's cart for changes.
    pub fn subscribe(&self, session: SessionId) -> CartSubscription {
        CartSubscription {
            session,
            events: self.inner.subscribe(),
            carts: self.inner.downgrade(),
            last_revision: None,
        }
    }

    async fn apply(&self, session: SessionId, action: CartAction) -> Result<CartOutcome, CartError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(session, action)
            .await
            .map_err(Self::map_error)
    }
}

/// Stream of cart states for one session.
///
/// Yields only states newer than the last one it yielded, and ends when the session is
/// closed or the actor shuts down. Does not keep the cart actor alive.
pub struct CartSubscription {
    session: SessionId,
    events: broadcast::Receiver<ResourceEvent<Cart>>,
    carts: WeakResourceClient<Cart>,
    last_revision: Option<u64>,
}

impl CartSubscription {
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Waits for the next change to the cart.
    pub async fn next(&mut self) -> Option<CartState> {
        loop {
            match self.events.recv().await {
                Ok(ResourceEvent::Created { id, entity } | ResourceEvent::Changed { id, entity })
                    if id == self.session =>
                {
                    if let Some(state) = self.accept(entity) {
                        return Some(state);
                    }
                }
                Ok(ResourceEvent::Deleted { id }) if id == self.session => return None,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(session = %self.session, skipped, "Cart subscriber lagged, resyncing");
                    // The dropped events may have included this session's latest change.
                    self.events = self.events.resubscribe();
                    match self.carts.get(self.session).await {
                        Ok(Some(cart)) => {
                            if let Some(state) = self.accept(cart) {
                                return Some(state);
                            }
                        }
                        Ok(None) => return None,
                        Err(e) => {
                            warn!(session = %self.session, error = %e, "Cart resync failed");
                            return None;
                        }
                    }
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    fn accept(&mut self, cart: Cart) -> Option<CartState> {
        if self.last_revision.is_some_and(|last| cart.revision <= last) {
            return None;
        }
        self.last_revision = Some(cart.revision);
        Some(cart.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, expect_get, MockClient};
    use crate::model::{Applied, MenuCategory};

    fn latte() -> MenuItem {
        MenuItem::new("hot-3", "Artisan Café Latte", 4.79, MenuCategory::HotCoffee)
    }

    #[tokio::test]
    async fn test_update_quantity_sends_action() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let carts = CartClient::new(client);

        let task = tokio::spawn(async move {
            carts
                .update_quantity(SessionId(1), ItemId::from("hot-3"), 3)
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, SessionId(1));
        match action {
            CartAction::UpdateQuantity { id, quantity } => {
                assert_eq!(id, ItemId::from("hot-3"));
                assert_eq!(quantity, 3);
            }
            other => panic!("Expected UpdateQuantity, got {other:?}"),
        }

        responder
            .send(Ok(CartOutcome {
                applied: Applied::Unchanged,
                state: CartState::new(),
            }))
            .unwrap();

        let outcome = task.await.unwrap().unwrap();
        assert!(!outcome.changed());
    }

    #[tokio::test]
    async fn test_snapshot_of_unknown_session() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let carts = CartClient::new(client);

        let task = tokio::spawn(async move { carts.snapshot(SessionId(9)).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, SessionId(9));
        responder.send(Ok(None)).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(CartError::SessionNotFound("session_9".into()))
        );
    }

    #[tokio::test]
    async fn test_not_found_maps_to_session_not_found() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action()
            .return_err(FrameworkError::NotFound("session_4".into()));
        let carts = CartClient::new(mock.client());

        let result = carts.add_item(SessionId(4), latte()).await;
        assert_eq!(result, Err(CartError::SessionNotFound("session_4".into())));
        mock.verify();
    }

    #[tokio::test]
    async fn test_subscription_filters_session_and_duplicates() {
        let mock = MockClient::<Cart>::new();
        let carts = CartClient::new(mock.client());
        let mut subscription = carts.subscribe(SessionId(1));

        let mut state = CartState::new();
        state.apply(CartAction::Add(latte()), 0.0);
        let cart = |session: u32, state: &CartState| Cart {
            session: SessionId(session),
            state: state.clone(),
            revision: 1,
        };

        // Another session's change, then the same revision twice, then a close.
        mock.publish(ResourceEvent::Changed { id: SessionId(2), entity: cart(2, &state) });
        mock.publish(ResourceEvent::Changed { id: SessionId(1), entity: cart(1, &state) });
        mock.publish(ResourceEvent::Changed { id: SessionId(1), entity: cart(1, &state) });
        mock.publish(ResourceEvent::Deleted { id: SessionId(1) });

        assert_eq!(subscription.next().await, Some(state));
        assert_eq!(subscription.next().await, None);
    }

    #[tokio::test]
    async fn test_lagged_subscription_resyncs_from_actor() {
        let mut mock = MockClient::<Cart>::new();
        let carts = CartClient::new(mock.client());
        let mut subscription = carts.subscribe(SessionId(1));

        let mut mine = CartState::new();
        mine.apply(CartAction::Add(latte()), 0.08);
        let first = Cart {
            session: SessionId(1),
            state: mine.clone(),
            revision: 1,
        };
        mock.publish(ResourceEvent::Changed {
            id: SessionId(1),
            entity: first.clone(),
        });

        // Enough traffic from another session to push ours out of the buffer.
        for revision in 0..300 {
            mock.publish(ResourceEvent::Changed {
                id: SessionId(2),
                entity: Cart {
                    session: SessionId(2),
                    state: CartState::new(),
                    revision,
                },
            });
        }
        mock.expect_get().return_ok(Some(first));

        let next = tokio::time::timeout(std::time::Duration::from_secs(1), subscription.next())
            .await
            .expect("Lagged subscription never resynced");
        assert_eq!(next, Some(mine));
        mock.verify();
    }

    #[tokio::test]
    async fn test_stale_revision_is_skipped() {
        let mock = MockClient::<Cart>::new();
        let carts = CartClient::new(mock.client());
        let mut subscription = carts.subscribe(SessionId(1));

        let mut newer = CartState::new();
        newer.apply(CartAction::Add(latte()), 0.0);
        let at = |revision: u64, state: CartState| ResourceEvent::Changed {
            id: SessionId(1),
            entity: Cart {
                session: SessionId(1),
                state,
                revision,
            },
        };

        mock.publish(at(2, newer.clone()));
        mock.publish(at(1, CartState::new()));
        mock.publish(ResourceEvent::Deleted { id: SessionId(1) });

        assert_eq!(subscription.next().await, Some(newer));
        assert_eq!(subscription.next().await, None);
    }
}
