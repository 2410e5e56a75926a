//! Actions and the values accepted at the dispatch boundary.

use core::fmt;

use futures::future::{self, BoxFuture, FutureExt};

use crate::{Completion, Thunk};

/// An immutable description of an intended state transition.
///
/// Every action carries a `kind` that identifies the transition. Any payload
/// lives in the implementing type itself, usually as enum variant data.
///
/// # Example
///
/// ```rust
/// use oxide_thunk::Action;
///
/// enum CounterAction {
///     Add(i64),
///     Reset,
/// }
///
/// impl Action for CounterAction {
///     fn kind(&self) -> &str {
///         match self {
///             CounterAction::Add(_) => "ADD",
///             CounterAction::Reset => "RESET",
///         }
///     }
/// }
/// ```
pub trait Action: Send + 'static {
    /// Identifier of the transition. Must not be empty.
    fn kind(&self) -> &str;
}

/// A value that can be handed to [`Store::dispatch`](crate::Store::dispatch).
///
/// Plain actions go to the reducer. Thunks are invoked with dispatch and
/// state-read capabilities instead.
pub enum Dispatchable<S, A> {
    /// Reduced into the next state.
    Action(A),
    /// Invoked, then spawned on the store's spawner.
    Thunk(Thunk<S, A>),
}

impl<S, A: Action> From<A> for Dispatchable<S, A> {
    fn from(action: A) -> Self {
        Dispatchable::Action(action)
    }
}

impl<S, A> From<Thunk<S, A>> for Dispatchable<S, A> {
    fn from(thunk: Thunk<S, A>) -> Self {
        Dispatchable::Thunk(thunk)
    }
}

impl<S, A: fmt::Debug> fmt::Debug for Dispatchable<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatchable::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Dispatchable::Thunk(_) => f.write_str("Thunk(..)"),
        }
    }
}

/// The outcome of a successful dispatch.
///
/// Dropping it never cancels anything: a thunk keeps running on the store's
/// spawner either way.
pub enum Dispatched<A> {
    /// A plain action was reduced. The action is handed back to the caller.
    Action(A),
    /// A thunk was invoked and spawned. The handle resolves when it is done.
    Pending(Completion<()>),
}

impl<A> Dispatched<A> {
    /// `true` if a thunk was dispatched.
    pub fn is_pending(&self) -> bool {
        matches!(self, Dispatched::Pending(_))
    }

    /// The dispatched action, if this was a plain action.
    pub fn into_action(self) -> Option<A> {
        match self {
            Dispatched::Action(action) => Some(action),
            Dispatched::Pending(_) => None,
        }
    }

    /// A future that resolves once the dispatch has fully completed.
    ///
    /// Plain actions are already complete, so they resolve immediately. A
    /// thunk resolves when it finishes, or when its spawner dropped it.
    pub fn into_future(self) -> BoxFuture<'static, ()> {
        match self {
            Dispatched::Action(_) => future::ready(()).boxed(),
            Dispatched::Pending(completion) => completion.wait().map(|_| ()).boxed(),
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Dispatched<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatched::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Dispatched::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
