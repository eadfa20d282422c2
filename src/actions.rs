use std::collections::HashMap;
use std::rc::Rc;

use crate::accels::Accelerator;

/// Callback invoked when an action is activated. `C` is whatever context
/// the application hands to its actions.
pub type Callback<C> = Rc<dyn Fn(&C)>;

/// Application-level actions and their user-visible titles.
pub const QUIT: &str = "quit";
pub const ABOUT: &str = "about";
pub const SHORTCUTS: &str = "shortcuts";
pub const PREFERENCES: &str = "preferences";

pub const APP_ACTIONS: [(&str, &str); 4] = [
    (QUIT, "Quit"),
    (ABOUT, "About"),
    (SHORTCUTS, "Keyboard Shortcuts"),
    (PREFERENCES, "Preferences"),
];

pub fn title_for(name: &str) -> Option<&'static str> {
    APP_ACTIONS
        .iter()
        .find(|(action, _)| *action == name)
        .map(|(_, title)| *title)
}

/// Handlers behind the application actions
pub trait ShellActions {
    fn quit(&self);
    fn about(&self);
    fn shortcuts(&self);
    fn preferences(&self);
}

/// The handler `name` maps to, or None for names that are not
/// application actions
pub fn shell_callback<C: ShellActions + 'static>(name: &str) -> Option<Callback<C>> {
    let callback: Callback<C> = match name {
        QUIT => Rc::new(|ctx: &C| ctx.quit()),
        ABOUT => Rc::new(|ctx: &C| ctx.about()),
        SHORTCUTS => Rc::new(|ctx: &C| ctx.shortcuts()),
        PREFERENCES => Rc::new(|ctx: &C| ctx.preferences()),
        _ => return None,
    };
    Some(callback)
}

struct Entry<C> {
    name: String,
    callback: Callback<C>,
    accels: Vec<Accelerator>,
}

/// Named commands with optional keyboard accelerators.
///
/// Registration order is kept so menus and the shortcuts window list
/// actions the way they were declared.
pub struct ActionRegistry<C> {
    entries: Vec<Entry<C>>,
    by_accel: HashMap<Accelerator, String>,
}

impl<C> Default for ActionRegistry<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            by_accel: HashMap::new(),
        }
    }
}

impl<C> ActionRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`. Returns false and leaves the registry untouched if
    /// the name is already taken.
    ///
    /// An accelerator that already belongs to another action moves to this
    /// one.
    pub fn register(&mut self, name: &str, callback: Callback<C>, accels: &[Accelerator]) -> bool {
        if self.contains(name) {
            log::debug!("action {name:?} already registered, ignoring");
            return false;
        }

        let mut own = Vec::new();
        for accel in accels {
            if own.contains(accel) {
                continue;
            }
            if let Some(previous) = self.by_accel.insert(accel.clone(), name.to_string()) {
                log::debug!("accelerator {accel} moved from {previous:?} to {name:?}");
                if let Some(entry) = self.entries.iter_mut().find(|e| e.name == previous) {
                    entry.accels.retain(|a| a != accel);
                }
            }
            own.push(accel.clone());
        }

        log::debug!("registered action {name:?} with {} accelerator(s)", own.len());
        self.entries.push(Entry {
            name: name.to_string(),
            callback,
            accels: own,
        });
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn callback(&self, name: &str) -> Option<Callback<C>> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.callback.clone())
    }

    pub fn accels_for(&self, name: &str) -> &[Accelerator] {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.accels.as_slice())
            .unwrap_or(&[])
    }

    /// Action names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Look up `name` and call it. Returns false if nothing is registered
    /// under that name.
    pub fn activate(&self, name: &str, ctx: &C) -> bool {
        match self.callback(name) {
            Some(callback) => {
                callback(ctx);
                true
            }
            None => {
                log::warn!("no action named {name:?}");
                false
            }
        }
    }

    /// `app.<name>` paired with its accelerators in GTK syntax, for every
    /// action. This is what gets handed to `set_accels_for_action`.
    pub fn accel_bindings(&self) -> Vec<(String, Vec<String>)> {
        self.entries
            .iter()
            .map(|e| {
                let accels = e.accels.iter().map(|a| a.to_string()).collect();
                (format!("app.{}", e.name), accels)
            })
            .collect()
    }
}
