use crate::settings::Settings;
use std::fmt::{self, Display};
use uuid::Uuid;

/// Handle returned by [`SettingsStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

type Listener = Box<dyn Fn(&Settings) + Send + Sync>;

/// Observable container for the settings being edited.
///
/// Form controls read through [`get`](Self::get) / [`with`](Self::with) and
/// write through [`set`](Self::set) / [`update`](Self::update). Every write
/// notifies subscribers synchronously, in subscription order, with the new
/// value.
pub struct SettingsStore {
    settings: Settings,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> Settings {
        self.settings.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&Settings) -> R) -> R {
        f(&self.settings)
    }

    /// Replace the whole settings value.
    pub fn set(&mut self, settings: Settings) {
        self.settings = settings;
        self.notify();
    }

    /// Mutate the settings in place and notify subscribers.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Settings) -> R) -> R {
        let result = f(&mut self.settings);
        self.notify();
        result
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&Settings) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        self.listeners.push((id, Box::new(listener)));
        log::debug!("Settings subscriber {id} registered");
        id
    }

    /// Remove a subscriber. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.settings);
        }
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Color;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_update_notifies_with_new_value() {
        let mut store = SettingsStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        store.subscribe(move |settings| {
            sink.lock().unwrap().push(settings.background.clone());
        });

        store.update(|settings| settings.background = Color::from("#101010"));
        store.set(Settings {
            background: Color::from("#202020"),
            ..Settings::default()
        });

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Color::from("#101010"), Color::from("#202020")]
        );
        assert_eq!(store.get().background.as_str(), "#202020");
    }

    #[test]
    fn test_subscribers_called_in_order() {
        let mut store = SettingsStore::default();
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second"] {
            let order = order.clone();
            store.subscribe(move |_| order.lock().unwrap().push(name));
        }

        store.update(|_| ());
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = SettingsStore::default();
        let calls = Arc::new(Mutex::new(0));

        let counter = calls.clone();
        let id = store.subscribe(move |_| *counter.lock().unwrap() += 1);

        store.update(|_| ());
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.update(|_| ());

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_update_returns_closure_result() {
        let mut store = SettingsStore::default();
        let previous = store.update(|settings| {
            std::mem::replace(&mut settings.backend_url, "https://api.example.com".into())
        });

        assert_eq!(previous, "");
        assert_eq!(store.with(|s| s.backend_url.clone()), "https://api.example.com");
    }
}
