//! Event channel - synchronous publish/subscribe keyed by event kind
//!
//! Every engine owns its own [`EventChannel`]. Handlers run in subscription order,
//! on the caller's stack, before `publish` returns. A handler cannot reach back into
//! the channel that is invoking it, so subscriptions never change mid-publish.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Refill,
    Clear,
    UseBomb,
    UseHorizontal,
    UseVertical,
    FallExit,
    CalculateEnd,
    NeedAdd,
}

/// Board mutation notifications, in the order a host should animate them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Stable board after a refill
    Refill(Board),
    /// Every coordinate emptied by one clear, detonations included
    Clear(Vec<Position>),
    /// Cells fired by one bomb
    UseBomb(Vec<Position>),
    /// Cells fired by one horizontal booster
    UseHorizontal(Vec<Position>),
    /// Cells fired by one vertical booster
    UseVertical(Vec<Position>),
    /// Fall markers that left through the bottom row
    FallExit(Vec<Position>),
    /// A swap (or settle) finished, all cascades included
    CalculateEnd,
    /// New cells each column needs after compaction, indexed by column
    NeedAdd(Vec<usize>),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Refill(_) => EventKind::Refill,
            Event::Clear(_) => EventKind::Clear,
            Event::UseBomb(_) => EventKind::UseBomb,
            Event::UseHorizontal(_) => EventKind::UseHorizontal,
            Event::UseVertical(_) => EventKind::UseVertical,
            Event::FallExit(_) => EventKind::FallExit,
            Event::CalculateEnd => EventKind::CalculateEnd,
            Event::NeedAdd(_) => EventKind::NeedAdd,
        }
    }

    /// Coordinates carried by position-list events
    pub fn positions(&self) -> Option<&[Position]> {
        match self {
            Event::Clear(p)
            | Event::UseBomb(p)
            | Event::UseHorizontal(p)
            | Event::UseVertical(p)
            | Event::FallExit(p) => Some(p),
            _ => None,
        }
    }
}

/// Token returned by [`EventChannel::subscribe`], used to remove that handler later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

pub type Handler = Box<dyn FnMut(&Event)>;

#[derive(Default)]
pub struct EventChannel {
    subscribers: HashMap<EventKind, Vec<(HandlerId, Handler)>>,
    next_id: u64,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every handler of its kind.
    /// Returns whether any handler was registered.
    pub fn publish(&mut self, event: &Event) -> bool {
        match self.subscribers.get_mut(&event.kind()) {
            Some(queue) if !queue.is_empty() => {
                for (_, handler) in queue.iter_mut() {
                    handler(event);
                }
                true
            }
            _ => false,
        }
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: FnMut(&Event) + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.subscribers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Remove one handler, or every handler of `kind` when `handler` is `None`
    pub fn unsubscribe(&mut self, kind: EventKind, handler: Option<HandlerId>) {
        match handler {
            Some(id) => {
                if let Some(queue) = self.subscribers.get_mut(&kind) {
                    queue.retain(|(existing, _)| *existing != id);
                }
            }
            None => {
                self.subscribers.remove(&kind);
            }
        }
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(EventKind, usize)> = self
            .subscribers
            .iter()
            .map(|(kind, queue)| (*kind, queue.len()))
            .collect();
        counts.sort_by_key(|(kind, _)| *kind as u8);
        f.debug_struct("EventChannel")
            .field("subscribers", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_publish_without_subscribers() {
        let mut channel = EventChannel::new();
        assert!(!channel.publish(&Event::CalculateEnd));
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let mut channel = EventChannel::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            channel.subscribe(EventKind::CalculateEnd, move |_| log.borrow_mut().push(tag));
        }

        assert!(channel.publish(&Event::CalculateEnd));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_kinds_are_isolated() {
        let mut channel = EventChannel::new();
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        channel.subscribe(EventKind::Clear, move |_| *h.borrow_mut() += 1);

        assert!(!channel.publish(&Event::FallExit(vec![])));
        assert!(channel.publish(&Event::Clear(vec![Position::new(0, 0)])));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe_single_and_all() {
        let mut channel = EventChannel::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        let first = channel.subscribe(EventKind::NeedAdd, move |_| l1.borrow_mut().push(1));
        let l2 = Rc::clone(&log);
        channel.subscribe(EventKind::NeedAdd, move |_| l2.borrow_mut().push(2));

        channel.unsubscribe(EventKind::NeedAdd, Some(first));
        channel.publish(&Event::NeedAdd(vec![1]));
        assert_eq!(*log.borrow(), vec![2]);

        channel.unsubscribe(EventKind::NeedAdd, None);
        assert_eq!(channel.subscriber_count(EventKind::NeedAdd), 0);
        assert!(!channel.publish(&Event::NeedAdd(vec![1])));
        assert_eq!(*log.borrow(), vec![2]);
    }

    #[test]
    fn test_unsubscribe_unknown_kind_is_noop() {
        let mut channel = EventChannel::new();
        channel.unsubscribe(EventKind::Refill, None);
        channel.unsubscribe(EventKind::Refill, Some(HandlerId(42)));
        assert_eq!(channel.subscriber_count(EventKind::Refill), 0);
    }

    #[test]
    fn test_event_kind_mapping() {
        assert_eq!(Event::CalculateEnd.kind(), EventKind::CalculateEnd);
        assert_eq!(
            Event::UseBomb(vec![Position::new(1, 1)]).positions(),
            Some(&[Position::new(1, 1)][..])
        );
        assert_eq!(Event::NeedAdd(vec![0, 2]).positions(), None);
    }
}
