use gtk4::prelude::*;
use gtk4::{
    gio, glib, Align, Application, ApplicationWindow, Box as GtkBox, HeaderBar, Label, MenuButton,
    Orientation,
};

use crate::about::APP_NAME;
use crate::shell::WindowHandle;

pub struct IplanWindow {
    pub window: ApplicationWindow,
}

impl IplanWindow {
    pub fn new(app: &Application) -> Self {
        let window = ApplicationWindow::builder()
            .application(app)
            .title(APP_NAME)
            .default_width(800)
            .default_height(600)
            .build();

        // Primary menu
        let menu = gio::Menu::new();
        menu.append(Some("_Preferences"), Some("app.preferences"));
        menu.append(Some("_Keyboard Shortcuts"), Some("app.shortcuts"));
        menu.append(Some("_About iplan"), Some("app.about"));

        let menu_button = MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .tooltip_text("Main Menu")
            .menu_model(&menu)
            .build();

        let header = HeaderBar::new();
        header.pack_end(&menu_button);
        window.set_titlebar(Some(&header));

        // Empty state
        let body = GtkBox::new(Orientation::Vertical, 6);
        body.set_halign(Align::Center);
        body.set_valign(Align::Center);

        let title = Label::new(Some("No Projects"));
        title.add_css_class("title-1");

        let hint = Label::new(Some("Nothing is planned yet"));
        hint.add_css_class("dim-label");

        body.append(&title);
        body.append(&hint);
        window.set_child(Some(&body));

        Self { window }
    }

    pub fn handle(&self) -> MainWindow {
        MainWindow(self.window.downgrade())
    }
}

/// Weak reference to the main window; the application owns the window
#[derive(Clone)]
pub struct MainWindow(glib::WeakRef<ApplicationWindow>);

impl MainWindow {
    pub fn window(&self) -> Option<ApplicationWindow> {
        self.0.upgrade()
    }
}

impl WindowHandle for MainWindow {
    fn is_alive(&self) -> bool {
        self.0.upgrade().is_some()
    }

    fn present(&self) {
        if let Some(window) = self.0.upgrade() {
            window.present();
        }
    }
}
