//! Observer list holding the latest value of a collection.
//!
//! New observers are called with the current value as soon as they subscribe,
//! then once per published value, synchronously and in publish order. Nothing
//! is batched or coalesced. Observers must not subscribe to the same subject
//! from inside a notification.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Observer<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

struct Inner<T> {
    value: Arc<Vec<T>>,
    observers: Vec<(u64, Observer<T>)>,
    next_id: u64,
}

/// Broadcast value holder with replay-latest-on-subscribe semantics.
pub struct Subject<T> {
    inner: Arc<Mutex<Inner<T>>>,
    // Held while observers run so deliveries never interleave.
    delivery: Mutex<()>,
}

fn lock<G>(mutex: &Mutex<G>) -> MutexGuard<'_, G> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Send + Sync + 'static> Subject<T> {
    /// Creates a subject holding `initial`.
    #[must_use]
    pub fn new(initial: Vec<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value: Arc::new(initial),
                observers: Vec::new(),
                next_id: 0,
            })),
            delivery: Mutex::new(()),
        }
    }

    /// Latest published value.
    #[must_use]
    pub fn value(&self) -> Arc<Vec<T>> {
        Arc::clone(&lock(&self.inner).value)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        lock(&self.inner).observers.len()
    }

    /// Registers `observer` and immediately calls it with the current value.
    ///
    /// The observer stays registered until the returned [`Subscription`] is
    /// dropped or explicitly unsubscribed.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        let _delivering = lock(&self.delivery);
        let observer: Observer<T> = Arc::new(observer);

        let (id, current) = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.observers.push((id, Arc::clone(&observer)));
            (id, Arc::clone(&inner.value))
        };

        observer(&current);

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).observers.retain(|(oid, _)| *oid != id);
                }
            })),
        }
    }

    /// Replaces the value and notifies every observer in registration order.
    pub fn publish(&self, value: Vec<T>) {
        let _delivering = lock(&self.delivery);

        let (current, observers) = {
            let mut inner = lock(&self.inner);
            inner.value = Arc::new(value);
            let observers: Vec<Observer<T>> = inner
                .observers
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect();
            (Arc::clone(&inner.value), observers)
        };

        for observer in observers {
            observer(&current);
        }
    }
}

/// Handle for a registered observer. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the observer immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Stops delivery to this observer.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<Vec<u32>>>>, impl Fn(&[u32]) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value: &[u32]| {
            sink.lock().unwrap().push(value.to_vec());
        })
    }

    #[test]
    fn test_subscribe_replays_current_value() {
        let subject = Subject::new(vec![1, 2]);
        let (seen, observer) = recorder();
        let _sub = subject.subscribe(observer);
        assert_eq!(*seen.lock().unwrap(), vec![vec![1, 2]]);
    }

    #[test]
    fn test_publish_notifies_in_order_without_coalescing() {
        let subject = Subject::new(Vec::new());
        let (seen, observer) = recorder();
        let _sub = subject.subscribe(observer);

        subject.publish(vec![1]);
        subject.publish(vec![1, 2]);
        subject.publish(vec![3]);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![vec![], vec![1], vec![1, 2], vec![3]]
        );
        assert_eq!(*subject.value(), vec![3]);
    }

    #[test]
    fn test_dropping_subscription_stops_delivery() {
        let subject = Subject::new(vec![0]);
        let (seen, observer) = recorder();
        let sub = subject.subscribe(observer);
        assert_eq!(subject.observer_count(), 1);

        drop(sub);
        subject.publish(vec![9]);

        assert_eq!(subject.observer_count(), 0);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let subject = Subject::new(vec![0]);
        let (seen, observer) = recorder();
        subject.subscribe(observer).unsubscribe();
        subject.publish(vec![5]);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_observer_may_read_value_during_notification() {
        let subject = Arc::new(Subject::new(vec![1]));
        let reader = Arc::clone(&subject);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = subject.subscribe(move |value: &[u32]| {
            sink.lock().unwrap().push(value == reader.value().as_slice());
        });

        subject.publish(vec![2, 3]);
        assert_eq!(*seen.lock().unwrap(), vec![true, true]);
    }
}
