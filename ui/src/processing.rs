//! In-flight mutation tracking, keyed by entity id.
//!
//! A mutation holds a [`TaskGuard`] for as long as its request is running.
//! The entry disappears when the guard drops, whichever way the task ends.

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Approving,
    Rejecting,
    Saving,
    Updating,
    Deleting,
}

impl TaskKind {
    /// Button text while the task runs.
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Approving => "Approving...",
            TaskKind::Rejecting => "Rejecting...",
            TaskKind::Saving => "Saving...",
            TaskKind::Updating => "Updating...",
            TaskKind::Deleting => "Deleting...",
        }
    }
}

/// Refusal to start a second mutation for an id that already has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("This wine is busy: {}", .running.label())]
pub struct Busy {
    pub running: TaskKind,
}

struct Inner<K> {
    tasks: HashMap<K, TaskKind>,
    on_change: Option<Rc<dyn Fn()>>,
}

pub struct TaskRegistry<K> {
    inner: Rc<RefCell<Inner<K>>>,
}

impl<K> Clone for TaskRegistry<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K> PartialEq for TaskRegistry<K> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K: Eq + Hash + Clone> Default for TaskRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> TaskRegistry<K> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                tasks: HashMap::new(),
                on_change: None,
            })),
        }
    }

    /// Registry that calls `on_change` whenever a task starts or ends.
    pub fn with_on_change(on_change: impl Fn() + 'static) -> Self {
        let registry = Self::new();
        registry.inner.borrow_mut().on_change = Some(Rc::new(on_change));
        registry
    }

    pub fn try_begin(
        &self,
        id: K,
        kind: TaskKind,
    ) -> Result<TaskGuard<K>, Busy> {
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(running) = inner.tasks.get(&id) {
                return Err(Busy { running: *running });
            }
            inner.tasks.insert(id.clone(), kind);
        }
        notify(&self.inner);
        Ok(TaskGuard {
            inner: Rc::clone(&self.inner),
            id,
        })
    }

    pub fn is_busy(&self, id: &K) -> bool {
        self.inner.borrow().tasks.contains_key(id)
    }

    pub fn kind(&self, id: &K) -> Option<TaskKind> {
        self.inner.borrow().tasks.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// The callback may read the registry, so no borrow is held while it runs.
fn notify<K>(inner: &Rc<RefCell<Inner<K>>>) {
    let on_change = inner.borrow().on_change.clone();
    if let Some(on_change) = on_change {
        on_change();
    }
}

#[must_use = "the task ends as soon as the guard is dropped"]
pub struct TaskGuard<K: Eq + Hash> {
    inner: Rc<RefCell<Inner<K>>>,
    id: K,
}

impl<K: Eq + Hash> Drop for TaskGuard<K> {
    fn drop(&mut self) {
        self.inner.borrow_mut().tasks.remove(&self.id);
        notify(&self.inner);
    }
}
