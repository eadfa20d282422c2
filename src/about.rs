pub const APP_ID: &str = "ir.imansalmani.iplan";
pub const APP_NAME: &str = "iplan";
pub const DEVELOPER: &str = "Iman Salmani";
pub const COPYRIGHT: &str = "© 2023 Iman Salmani";

/// Everything the About dialog shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutInfo {
    pub application_name: &'static str,
    pub application_icon: &'static str,
    pub version: String,
    pub developers: Vec<&'static str>,
    pub copyright: &'static str,
}

impl AboutInfo {
    pub fn new(version: &str) -> Self {
        Self {
            application_name: APP_NAME,
            application_icon: APP_ID,
            version: version.to_string(),
            developers: vec![DEVELOPER],
            copyright: COPYRIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_matches_release() {
        let about = AboutInfo::new(env!("CARGO_PKG_VERSION"));
        assert_eq!(about.application_name, "iplan");
        assert_eq!(about.version, "0.1.0");
        assert_eq!(about.copyright, "© 2023 Iman Salmani");
        assert_eq!(about.application_icon, "ir.imansalmani.iplan");
        assert_eq!(about.developers, vec!["Iman Salmani"]);
    }
}
