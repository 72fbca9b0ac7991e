//! Batch scopes: collecting edits from many handles into one remote call.
//!
//! Outside a scope every edit is its own `batchUpdate` round-trip. While a
//! scope is open on a slide, the slide and every handle it owns append their
//! instructions to one shared list instead, and closing the scope submits
//! the list as a single call.
//!
//! Scopes do not nest: opening a scope on a target that already has one is
//! a precondition failure.
//!
//! # Example
//!
//! ```no_run
//! # fn demo(presentation: &oodles::Presentation) -> oodles::Result<()> {
//! let mut slide = presentation.page(1)?;
//! slide.batch(|slide| {
//!     slide.set_text("Title", "New <b>title</b>")?;
//!     slide.images().replace(0, "https://example.com/chart.png")?;
//!     Ok(())
//! })?;
//! # Ok(())
//! # }
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::config::Config;
use crate::detect::DocumentKind;
use crate::error::{Error, Result};
use crate::request::Request;

/// Ordered list of pending instructions shared by the handles of a scope.
///
/// Clones refer to the same list.
#[derive(Debug, Clone, Default)]
pub struct BatchScope {
    pending: Rc<RefCell<Vec<Request>>>,
}

impl BatchScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append instructions, keeping their order.
    pub fn push_all(&self, requests: Vec<Request>) {
        self.pending.borrow_mut().extend(requests);
    }

    /// Number of pending instructions.
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Check if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Copy of the pending instructions.
    pub fn pending(&self) -> Vec<Request> {
        self.pending.borrow().clone()
    }

    /// Check if two handles share the same scope.
    pub fn same_as(&self, other: &BatchScope) -> bool {
        Rc::ptr_eq(&self.pending, &other.pending)
    }

    fn take(&self) -> Vec<Request> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }
}

/// Routes a handle's instructions to the service or to an open scope.
///
/// Clones share one scope slot, so attaching or detaching a scope through
/// any clone is seen by all of them, including handles already given out.
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<Config>,
    presentation_id: String,
    scope: Rc<RefCell<Option<BatchScope>>>,
}

impl Dispatcher {
    /// Create a dispatcher for a presentation.
    pub fn new(config: Arc<Config>, presentation_id: impl Into<String>) -> Self {
        Self {
            config,
            presentation_id: presentation_id.into(),
            scope: Rc::new(RefCell::new(None)),
        }
    }

    /// Presentation the instructions target.
    pub fn presentation_id(&self) -> &str {
        &self.presentation_id
    }

    /// Shared configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Currently attached scope.
    pub fn scope(&self) -> Option<BatchScope> {
        self.scope.borrow().clone()
    }

    pub(crate) fn attach(&self, scope: Option<BatchScope>) {
        *self.scope.borrow_mut() = scope;
    }

    /// Submit instructions now, or queue them in the attached scope.
    pub fn submit(&self, requests: Vec<Request>, operation: &str) -> Result<()> {
        if requests.is_empty() {
            return Ok(());
        }
        if let Some(scope) = self.scope() {
            log::debug!(
                "{}: queued {} instructions for {}",
                operation,
                requests.len(),
                self.presentation_id
            );
            scope.push_all(requests);
            return Ok(());
        }

        log::debug!(
            "{}: sending {} instructions to {}",
            operation,
            requests.len(),
            self.presentation_id
        );
        self.config
            .service()
            .batch_update(DocumentKind::Presentation, &self.presentation_id, &requests)
            .map_err(|e| self.config.service_error(e, operation, &self.presentation_id))?;
        Ok(())
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("presentation_id", &self.presentation_id)
            .field("scope", &self.scope().map(|s| s.len()))
            .finish()
    }
}

/// Anything that owns a dispatcher and can pass a scope down to its children.
pub trait BatchTarget {
    /// The target's own dispatcher.
    fn dispatcher(&self) -> &Dispatcher;

    /// Attach (or with `None`, detach) a scope on the target and every
    /// handle it has handed out.
    fn attach_scope(&mut self, scope: Option<BatchScope>);
}

/// Open a scope on `target` and all of its handles.
pub fn enter<T: BatchTarget + ?Sized>(target: &mut T) -> Result<BatchScope> {
    if target.dispatcher().scope().is_some() {
        return Err(Error::Precondition(
            "a batch scope is already open on this target; nested scopes are not supported"
                .into(),
        ));
    }
    let scope = BatchScope::new();
    target.attach_scope(Some(scope.clone()));
    Ok(scope)
}

/// Close the scope on `target`, submitting what accumulated as one call.
///
/// The scope is detached from every handle before submission, so the
/// target is unscoped afterwards whether or not the call succeeds.
/// Returns the number of instructions submitted.
pub fn exit<T: BatchTarget + ?Sized>(target: &mut T) -> Result<usize> {
    let scope = target
        .dispatcher()
        .scope()
        .ok_or_else(|| Error::Precondition("no batch scope is open on this target".into()))?;
    target.attach_scope(None);

    let requests = scope.take();
    if requests.is_empty() {
        log::debug!("batch scope closed with nothing to send");
        return Ok(0);
    }
    let count = requests.len();
    target.dispatcher().submit(requests, "batchUpdate")?;
    Ok(count)
}

/// Run `f` inside a scope on `target`.
///
/// The scope is closed (and flushed) even when `f` fails; the error of `f`
/// takes precedence over a flush error.
pub fn scoped<T, R, F>(target: &mut T, f: F) -> Result<R>
where
    T: BatchTarget + ?Sized,
    F: FnOnce(&mut T) -> Result<R>,
{
    enter(target)?;
    let result = f(target);
    let flushed = exit(target);
    let value = result?;
    flushed?;
    Ok(value)
}
