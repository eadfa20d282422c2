use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;

static GTK_ACCEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:<[A-Za-z0-9]+>)*)([^<>]+)$").expect("valid accelerator pattern")
});
static GTK_MODIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z0-9]+)>").expect("valid modifier pattern"));

/// A keyboard accelerator in canonical form.
///
/// Both GTK syntax (`<Ctrl>q`, `<Primary>comma`) and the human form
/// (`Ctrl+Q`, `Ctrl+?`) parse to the same value, so lookups never depend on
/// how a binding was spelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accelerator {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub super_key: bool,
    /// GDK key name, e.g. `q`, `question`, `Return`
    pub key: String,
}

impl Accelerator {
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidAccelerator(input.to_string()));
        }

        let mut accel = Accelerator {
            ctrl: false,
            shift: false,
            alt: false,
            super_key: false,
            key: String::new(),
        };

        let key = if trimmed.starts_with('<') {
            let caps = GTK_ACCEL
                .captures(trimmed)
                .ok_or_else(|| AppError::InvalidAccelerator(input.to_string()))?;
            for modifier in GTK_MODIFIER.captures_iter(&caps[1]) {
                accel.set_modifier(&modifier[1], input)?;
            }
            caps[2].to_string()
        } else {
            // "Ctrl++" binds the plus key itself
            let (mods, key) = match trimmed.strip_suffix("++") {
                Some(mods) => (mods, "+"),
                None => match trimmed.rsplit_once('+') {
                    Some((mods, key)) => (mods, key),
                    None => ("", trimmed),
                },
            };
            for modifier in mods.split('+').filter(|m| !m.is_empty()) {
                accel.set_modifier(modifier.trim(), input)?;
            }
            key.trim().to_string()
        };

        accel.key = normalize_key(&key).ok_or_else(|| AppError::InvalidAccelerator(input.to_string()))?;
        Ok(accel)
    }

    fn set_modifier(&mut self, name: &str, input: &str) -> Result<(), AppError> {
        match name.to_ascii_lowercase().as_str() {
            // <Primary> is Command on macOS; bindings are stored as Ctrl
            "ctrl" | "control" | "primary" => self.ctrl = true,
            "shift" => self.shift = true,
            "alt" | "mod1" => self.alt = true,
            "super" | "meta" => self.super_key = true,
            _ => return Err(AppError::InvalidAccelerator(input.to_string())),
        }
        Ok(())
    }
}

impl FromStr for Accelerator {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Formats in GTK syntax, ready for `set_accels_for_action`
impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("<Ctrl>")?;
        }
        if self.shift {
            f.write_str("<Shift>")?;
        }
        if self.alt {
            f.write_str("<Alt>")?;
        }
        if self.super_key {
            f.write_str("<Super>")?;
        }
        f.write_str(&self.key)
    }
}

/// Convert a key as typed by a person into its GDK key name
fn normalize_key(key: &str) -> Option<String> {
    let mut chars = key.chars();
    let first = chars.next()?;

    if chars.next().is_none() {
        let name = match first {
            c if c.is_ascii_alphabetic() => c.to_ascii_lowercase().to_string(),
            c if c.is_ascii_digit() => c.to_string(),
            '?' => "question".to_string(),
            ',' => "comma".to_string(),
            '.' => "period".to_string(),
            '/' => "slash".to_string(),
            ';' => "semicolon".to_string(),
            ':' => "colon".to_string(),
            '-' => "minus".to_string(),
            '+' => "plus".to_string(),
            '=' => "equal".to_string(),
            _ => return None,
        };
        return Some(name);
    }

    let lower = key.to_ascii_lowercase();
    if let Some(number) = lower.strip_prefix('f') {
        if number.parse::<u8>().is_ok_and(|n| (1..=24).contains(&n)) && !number.starts_with('0') {
            return Some(format!("F{number}"));
        }
    }

    NAMED_KEYS
        .iter()
        .find(|(aliases, _)| aliases.contains(&lower.as_str()))
        .map(|(_, name)| name.to_string())
}

/// Multi-character keys GTK understands: lower-cased spellings, then the
/// GDK key name. Modifier names are not keys.
const NAMED_KEYS: &[(&[&str], &str)] = &[
    (&["return", "enter"], "Return"),
    (&["escape", "esc"], "Escape"),
    (&["tab"], "Tab"),
    (&["backspace"], "BackSpace"),
    (&["delete", "del"], "Delete"),
    (&["insert", "ins"], "Insert"),
    (&["space"], "space"),
    (&["home"], "Home"),
    (&["end"], "End"),
    (&["page_up", "pageup", "pgup"], "Page_Up"),
    (&["page_down", "pagedown", "pgdn"], "Page_Down"),
    (&["left"], "Left"),
    (&["right"], "Right"),
    (&["up"], "Up"),
    (&["down"], "Down"),
    (&["question"], "question"),
    (&["comma"], "comma"),
    (&["period"], "period"),
    (&["slash"], "slash"),
    (&["backslash"], "backslash"),
    (&["semicolon"], "semicolon"),
    (&["colon"], "colon"),
    (&["minus"], "minus"),
    (&["plus"], "plus"),
    (&["equal"], "equal"),
    (&["bracketleft"], "bracketleft"),
    (&["bracketright"], "bracketright"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gtk_syntax() {
        let accel = Accelerator::parse("<Ctrl>q").unwrap();
        assert!(accel.ctrl);
        assert!(!accel.shift);
        assert_eq!(accel.key, "q");
        assert_eq!(accel.to_string(), "<Ctrl>q");
    }

    #[test]
    fn test_primary_is_ctrl() {
        assert_eq!(
            Accelerator::parse("<Primary>comma").unwrap(),
            Accelerator::parse("<Ctrl>comma").unwrap()
        );
    }

    #[test]
    fn test_human_syntax_matches_gtk_syntax() {
        assert_eq!(Accelerator::parse("Ctrl+Q").unwrap().to_string(), "<Ctrl>q");
        assert_eq!(Accelerator::parse("Ctrl+?").unwrap().to_string(), "<Ctrl>question");
        assert_eq!(Accelerator::parse("ctrl+,").unwrap().to_string(), "<Ctrl>comma");
    }

    #[test]
    fn test_modifier_order_is_canonical() {
        let a = Accelerator::parse("<Shift><Control>z").unwrap();
        let b = Accelerator::parse("Ctrl+Shift+Z").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "<Ctrl><Shift>z");
    }

    #[test]
    fn test_plus_key() {
        let accel = Accelerator::parse("Ctrl++").unwrap();
        assert!(accel.ctrl);
        assert_eq!(accel.key, "plus");
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(Accelerator::parse("Esc").unwrap().key, "Escape");
        assert_eq!(Accelerator::parse("<Alt>Return").unwrap().to_string(), "<Alt>Return");
        assert_eq!(Accelerator::parse("f5").unwrap().key, "F5");
        assert_eq!(Accelerator::parse("<Ctrl>Page_Up").unwrap().key, "Page_Up");
        assert_eq!(Accelerator::parse("Ctrl+PgDn").unwrap().to_string(), "<Ctrl>Page_Down");
    }

    #[test]
    fn test_modifier_alone_is_not_a_key() {
        for input in ["Ctrl", "Shift", "alt", "<Ctrl>Control", "Ctrl+Super"] {
            assert!(Accelerator::parse(input).is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn test_unknown_key_names_are_rejected() {
        assert!(Accelerator::parse("Ctrl+Foo").is_err());
        assert!(Accelerator::parse("<Ctrl>NotAKey").is_err());
        assert!(Accelerator::parse("<Ctrl>Page_Upp").is_err());
    }

    #[test]
    fn test_bare_key() {
        let accel = Accelerator::parse("q").unwrap();
        assert!(!accel.ctrl && !accel.shift && !accel.alt && !accel.super_key);
        assert_eq!(accel.to_string(), "q");
    }

    #[test]
    fn test_invalid_accelerators() {
        assert!(Accelerator::parse("").is_err());
        assert!(Accelerator::parse("<Hyper>q").is_err());
        assert!(Accelerator::parse("<Ctrl>").is_err());
        assert!(Accelerator::parse("Ctrl+").is_err());
        assert!(Accelerator::parse("Ctrl+é").is_err());
        assert!(Accelerator::parse("F0").is_err());
        assert!(Accelerator::parse("F25").is_err());
        assert!(Accelerator::parse("Bogus+q").is_err());
    }
}
