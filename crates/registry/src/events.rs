//! Change notifications for reactive consumers.
//!
//! The workspace API is request/response; subscribers are told after a
//! mutation has been committed and persisted, never before.

use pactum_core::Transition;

/// A committed change to one of the collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    BlueprintAdded { blueprint_id: String },
    BlueprintUpdated { blueprint_id: String },
    BlueprintDeleted { blueprint_id: String },
    ContractCreated { contract_id: String, blueprint_id: String },
    ContractEdited { contract_id: String },
    ContractTransitioned(Transition),
}

/// Handle returned by `Workspace::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&ChangeEvent)>;

#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    pub(crate) fn notify(&mut self, event: &ChangeEvent) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notify_reaches_live_subscribers_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::default();

        let sink = Rc::clone(&seen);
        let a = subs.subscribe(Box::new(move |e| sink.borrow_mut().push(("a", e.clone()))));
        let sink = Rc::clone(&seen);
        subs.subscribe(Box::new(move |e| sink.borrow_mut().push(("b", e.clone()))));

        let event = ChangeEvent::BlueprintAdded {
            blueprint_id: "bp".to_string(),
        };
        subs.notify(&event);
        assert!(subs.unsubscribe(a));
        assert!(!subs.unsubscribe(a));
        subs.notify(&event);

        let tags: Vec<&str> = seen.borrow().iter().map(|(t, _)| *t).collect();
        assert_eq!(tags, vec!["a", "b", "b"]);
        assert_eq!(subs.len(), 1);
    }
}
