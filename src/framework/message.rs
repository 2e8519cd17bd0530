//! # Generic Messages
//!
//! Requests travelling from `ResourceClient` to `ResourceActor`, and the change events the
//! actor publishes back out to subscribers.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// - **Create**: Lifecycle start. Uses [`ActorEntity::Create`] to initialize a new resource.
/// - **Get**: Fetches the current state of the resource by ID.
/// - **Delete**: Lifecycle end. Removes the resource.
/// - **Action**: Executes a resource-specific [`ActorEntity::Action`].
///
/// Messages are processed in the order they were sent; every mutation sees the state left
/// by the previous one.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

/// Published by a `ResourceActor` after every successful state change.
///
/// Each event carries a full copy of the entity, so a subscriber that misses events
/// can always resynchronise from the next one.
#[derive(Debug, Clone)]
pub enum ResourceEvent<T: ActorEntity> {
    Created { id: T::Id, entity: T },
    Changed { id: T::Id, entity: T },
    Deleted { id: T::Id },
}

impl<T: ActorEntity> ResourceEvent<T> {
    /// The ID of the entity this event is about.
    pub fn id(&self) -> &T::Id {
        match self {
            ResourceEvent::Created { id, .. }
            | ResourceEvent::Changed { id, .. }
            | ResourceEvent::Deleted { id } => id,
        }
    }
}
