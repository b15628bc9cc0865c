use std::collections::HashMap;
use std::hash::Hash;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any stored document must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: EntityError;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Key derived from the payload itself (coupon code, wishlist pair).
    ///
    /// When this returns `Some`, the generated id is not used and a second
    /// create with the same key is rejected with [`FrameworkError::AlreadyExists`].
    fn natural_key(_payload: &Self::CreatePayload) -> Option<Self::Id> {
        None
    }

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> { Ok(()) }

    // --- Action Handler ---

    /// Handle a custom domain-specific action.
    ///
    /// The actor processes one message at a time, so an action is an atomic
    /// read-modify-write on the entity.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Domain error types that the framework can report through.
pub trait EntityError: std::error::Error + Clone + Send + Sync + 'static {
    fn not_found(id: String) -> Self;
    fn already_exists(id: String) -> Self;
    fn communication(message: String) -> Self;
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("{0}")]
    Entity(E),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

impl<E: EntityError> FrameworkError<E> {
    /// Collapse into the entity's own error type.
    pub fn into_entity_error(self) -> E {
        match self {
            FrameworkError::NotFound(id) => E::not_found(id),
            FrameworkError::AlreadyExists(id) => E::already_exists(id),
            FrameworkError::Entity(e) => e,
            other => E::communication(other.to_string()),
        }
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    }
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.store.values().cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = match self.store.get(&id) {
                        // Patch a copy so a failed hook leaves the stored entity untouched.
                        Some(item) => {
                            let mut updated = item.clone();
                            match updated.on_update(patch) {
                                Ok(()) => {
                                    self.store.insert(id, updated.clone());
                                    Ok(updated)
                                }
                                Err(e) => Err(FrameworkError::Entity(e)),
                            }
                        }
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let result = match self.store.get(&id) {
                        Some(item) => match item.on_delete() {
                            Ok(()) => {
                                self.store.remove(&id);
                                Ok(())
                            }
                            Err(e) => Err(FrameworkError::Entity(e)),
                        },
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.get(&id) {
                        Some(item) => {
                            let mut updated = item.clone();
                            match updated.handle_action(action) {
                                Ok(outcome) => {
                                    self.store.insert(id, updated);
                                    Ok(outcome)
                                }
                                Err(e) => Err(FrameworkError::Entity(e)),
                            }
                        }
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
            }
        }
    }

    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError<T::Error>> {
        let id = match T::natural_key(&payload) {
            Some(key) if self.store.contains_key(&key) => {
                return Err(FrameworkError::AlreadyExists(key.to_string()));
            }
            Some(key) => key,
            None => (self.next_id_fn)(),
        };
        let mut item = T::from_create(id.clone(), payload).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        self.store.insert(id.clone(), item);
        Ok(id)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(build(respond_to))
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
