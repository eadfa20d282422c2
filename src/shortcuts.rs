use gtk4::{Builder, ShortcutsWindow};

use crate::actions::{self, ActionRegistry};
use crate::error::{AppError, Result};

pub const WINDOW_ID: &str = "shortcuts_window";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub title: String,
    /// GTK accelerator syntax; several may be separated by spaces
    pub accelerator: String,
    pub action_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutsGroup {
    pub title: String,
    pub shortcuts: Vec<Shortcut>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutsSection {
    pub name: String,
    pub groups: Vec<ShortcutsGroup>,
}

/// Layout of the keyboard shortcuts window, independent of GTK
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShortcutsView {
    pub sections: Vec<ShortcutsSection>,
}

impl ShortcutsView {
    /// One "General" group listing every action that has an accelerator
    pub fn from_registry<C>(registry: &ActionRegistry<C>) -> Self {
        let shortcuts = registry
            .names()
            .filter_map(|name| {
                let accels = registry.accels_for(name);
                if accels.is_empty() {
                    return None;
                }
                let accelerator = accels
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                Some(Shortcut {
                    title: actions::title_for(name).unwrap_or(name).to_string(),
                    accelerator,
                    action_name: Some(format!("app.{name}")),
                })
            })
            .collect();

        Self {
            sections: vec![ShortcutsSection {
                name: "shortcuts".to_string(),
                groups: vec![ShortcutsGroup {
                    title: "General".to_string(),
                    shortcuts,
                }],
            }],
        }
    }

    /// Render as a GtkBuilder definition whose root is a `GtkShortcutsWindow`
    /// with id [`WINDOW_ID`]
    pub fn to_ui_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<interface>\n");
        xml.push_str(&format!("  <object class=\"GtkShortcutsWindow\" id=\"{WINDOW_ID}\">\n"));
        xml.push_str(&property(4, "modal", "0", false));

        for section in &self.sections {
            xml.push_str("    <child>\n      <object class=\"GtkShortcutsSection\">\n");
            xml.push_str(&property(8, "section-name", &section.name, false));
            xml.push_str(&property(8, "max-height", "10", false));

            for group in &section.groups {
                xml.push_str("        <child>\n          <object class=\"GtkShortcutsGroup\">\n");
                xml.push_str(&property(12, "title", &group.title, true));

                for shortcut in &group.shortcuts {
                    xml.push_str("            <child>\n              <object class=\"GtkShortcutsShortcut\">\n");
                    xml.push_str(&property(16, "title", &shortcut.title, true));
                    xml.push_str(&property(16, "accelerator", &shortcut.accelerator, false));
                    if let Some(action) = &shortcut.action_name {
                        xml.push_str(&property(16, "action-name", action, false));
                    }
                    xml.push_str("              </object>\n            </child>\n");
                }

                xml.push_str("          </object>\n        </child>\n");
            }

            xml.push_str("      </object>\n    </child>\n");
        }

        xml.push_str("  </object>\n</interface>\n");
        xml
    }
}

/// One `<property>` line, value escaped
fn property(indent: usize, name: &str, value: &str, translatable: bool) -> String {
    let translatable = if translatable { " translatable=\"yes\"" } else { "" };
    format!(
        "{:indent$}<property name=\"{name}\"{translatable}>{}</property>\n",
        "",
        escape(value)
    )
}

/// Build the shortcuts window from a UI definition. Malformed XML aborts
/// inside GTK; a definition without the window object is an error.
pub fn load_shortcuts_window(ui: &str) -> Result<ShortcutsWindow> {
    let builder = Builder::from_string(ui);
    builder
        .object::<ShortcutsWindow>(WINDOW_ID)
        .ok_or(AppError::MissingUiObject(WINDOW_ID))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accels::Accelerator;
    use std::rc::Rc;

    fn registry() -> ActionRegistry<()> {
        let mut registry = ActionRegistry::new();
        let noop: crate::actions::Callback<()> = Rc::new(|_: &()| {});
        let accel = |s: &str| Accelerator::parse(s).unwrap();
        registry.register("quit", noop.clone(), &[accel("<Ctrl>q")]);
        registry.register("about", noop.clone(), &[]);
        registry.register("shortcuts", noop.clone(), &[accel("<Ctrl>question"), accel("F1")]);
        registry.register("preferences", noop, &[accel("<Ctrl>comma")]);
        registry
    }

    #[test]
    fn test_view_lists_accelerated_actions_in_order() {
        let view = ShortcutsView::from_registry(&registry());
        let group = &view.sections[0].groups[0];
        let titles: Vec<_> = group.shortcuts.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Quit", "Keyboard Shortcuts", "Preferences"]);
        assert_eq!(group.shortcuts[1].accelerator, "<Ctrl>question F1");
        assert_eq!(group.shortcuts[0].action_name.as_deref(), Some("app.quit"));
    }

    #[test]
    fn test_xml_escapes_accelerators() {
        let xml = ShortcutsView::from_registry(&registry()).to_ui_xml();
        assert!(xml.contains("class=\"GtkShortcutsWindow\" id=\"shortcuts_window\""));
        assert!(xml.contains("<property name=\"accelerator\">&lt;Ctrl&gt;q</property>"));
        assert!(xml.contains("&lt;Ctrl&gt;comma"));
        assert!(!xml.contains("<Ctrl>"));
    }

    #[test]
    fn test_xml_is_balanced() {
        let xml = ShortcutsView::from_registry(&registry()).to_ui_xml();
        assert_eq!(xml.matches("<object ").count(), xml.matches("</object>").count());
        assert_eq!(xml.matches("<child>").count(), xml.matches("</child>").count());
        assert_eq!(xml.matches("GtkShortcutsShortcut").count(), 3);
    }

    #[test]
    fn test_property_line() {
        assert_eq!(
            property(2, "title", "Quit & Exit", true),
            "  <property name=\"title\" translatable=\"yes\">Quit &amp; Exit</property>\n"
        );
        assert_eq!(property(0, "modal", "0", false), "<property name=\"modal\">0</property>\n");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("Tom & \"Jerry\" <3"), "Tom &amp; &quot;Jerry&quot; &lt;3");
    }
}
