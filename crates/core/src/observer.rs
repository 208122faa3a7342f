/// Receives events and optionally returns a control action.
///
/// Solvers emit events as they integrate, and the animation driver emits one
/// event per frame. An observer can inspect each event and steer the caller
/// by returning an action, or return `None` to let it continue.
///
/// The unit type `()` is a no-op observer, and any `FnMut(&E) -> Option<A>`
/// closure is an observer.
///
/// # Example
///
/// ```
/// use clockwork_core::Observer;
///
/// #[derive(Debug, PartialEq)]
/// enum Action {
///     Stop,
/// }
///
/// let mut observer = |value: &f64| (*value > 1.0).then_some(Action::Stop);
///
/// assert_eq!(observer.observe(&0.5), None);
/// assert_eq!(observer.observe(&2.0), Some(Action::Stop));
/// ```
pub trait Observer<E, A> {
    /// Observes an event and returns an optional action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_never_acts() {
        let mut observer = ();
        let action: Option<u8> = observer.observe(&42);
        assert!(action.is_none());
    }

    #[test]
    fn closure_sees_every_event() {
        let mut events = Vec::new();
        let mut observer = |event: &u32| -> Option<()> {
            events.push(*event);
            None
        };

        for event in 0..3 {
            observer.observe(&event);
        }

        assert_eq!(events, vec![0, 1, 2]);
    }
}
