use gtk4::prelude::*;
use gtk4::{gio, glib, AboutDialog, Application, ApplicationWindow};
use std::cell::RefCell;
use std::rc::Rc;

use crate::about::{AboutInfo, APP_ID};
use crate::accels::Accelerator;
use crate::actions::{shell_callback, ActionRegistry, Callback, ShellActions};
use crate::config::AccelConfig;
use crate::shell::WindowTracker;
use crate::shortcuts::{load_shortcuts_window, ShortcutsView};
use crate::ui::{IplanWindow, MainWindow};

/// State shared by the application's signal handlers and actions
pub struct AppContext {
    pub app: Application,
    pub about: AboutInfo,
    pub accels: AccelConfig,
    pub windows: WindowTracker<MainWindow>,
    pub actions: RefCell<ActionRegistry<AppContext>>,
}

pub struct IplanApplication {
    ctx: Rc<AppContext>,
}

impl IplanApplication {
    pub fn new(version: &str) -> Self {
        let app = Application::builder().application_id(APP_ID).build();

        let ctx = Rc::new(AppContext {
            app: app.clone(),
            about: AboutInfo::new(version),
            accels: AccelConfig::load(),
            windows: WindowTracker::new(),
            actions: RefCell::new(ActionRegistry::new()),
        });

        let weak = Rc::downgrade(&ctx);
        app.connect_startup(move |_| {
            if let Some(ctx) = weak.upgrade() {
                ctx.register_app_actions();
            }
        });

        let weak = Rc::downgrade(&ctx);
        app.connect_activate(move |_| {
            if let Some(ctx) = weak.upgrade() {
                ctx.activate();
            }
        });

        Self { ctx }
    }

    /// Run the main loop with the process arguments
    pub fn run(&self) -> glib::ExitCode {
        self.ctx.app.run()
    }
}

impl AppContext {
    /// Raise the main window, creating it if necessary
    fn activate(&self) {
        self.windows.activate(|| IplanWindow::new(&self.app).handle());
    }

    fn register_app_actions(self: &Rc<Self>) {
        for (name, accels) in self.accels.bindings() {
            if let Some(callback) = shell_callback(name) {
                self.create_action(name, callback, &accels);
            }
        }
    }

    /// Add an `app.<name>` action backed by the registry
    pub fn create_action(self: &Rc<Self>, name: &str, callback: Callback<AppContext>, accels: &[Accelerator]) {
        if !self.actions.borrow_mut().register(name, callback, accels) {
            return;
        }

        let action = gio::SimpleAction::new(name, None);
        let weak = Rc::downgrade(self);
        let action_name = name.to_string();
        action.connect_activate(move |_, _| {
            let Some(ctx) = weak.upgrade() else { return };
            ctx.actions.borrow().activate(&action_name, ctx.as_ref());
        });
        self.app.add_action(&action);

        self.sync_accels();
    }

    /// Push the registry's accelerators to GTK. A registration may take an
    /// accelerator away from an earlier action, so every action is updated.
    fn sync_accels(&self) {
        let bindings = self.actions.borrow().accel_bindings();
        for (detailed_name, accels) in bindings {
            let accels: Vec<&str> = accels.iter().map(String::as_str).collect();
            self.app.set_accels_for_action(&detailed_name, &accels);
        }
    }

    /// Parent for transient dialogs. Without one the dialog still shows,
    /// just unparented.
    fn parent_window(&self, dialog: &str) -> Option<ApplicationWindow> {
        let parent = self.windows.active().and_then(|w| w.window());
        if parent.is_none() {
            log::warn!("no active window, showing {dialog} without a parent");
        }
        parent
    }
}

impl ShellActions for AppContext {
    fn quit(&self) {
        log::debug!("quit requested");
        self.app.quit();
    }

    fn about(&self) {
        let about = &self.about;
        let dialog = AboutDialog::new();
        dialog.set_program_name(Some(about.application_name));
        dialog.set_logo_icon_name(Some(about.application_icon));
        dialog.set_version(Some(about.version.as_str()));
        dialog.set_authors(&about.developers);
        dialog.set_copyright(Some(about.copyright));
        dialog.set_modal(false);
        if let Some(parent) = self.parent_window("about dialog") {
            dialog.set_transient_for(Some(&parent));
        }
        dialog.present();
    }

    fn shortcuts(&self) {
        let ui = {
            let registry = self.actions.borrow();
            ShortcutsView::from_registry(&*registry).to_ui_xml()
        };
        match load_shortcuts_window(&ui) {
            Ok(window) => {
                if let Some(parent) = self.parent_window("shortcuts window") {
                    window.set_transient_for(Some(&parent));
                }
                window.present();
            }
            Err(e) => log::error!("cannot show keyboard shortcuts: {e}"),
        }
    }

    fn preferences(&self) {
        log::info!("app.preferences action activated");
    }
}
