//! `Info.plist` and `PkgInfo` rendering.
//!
//! The launcher reads these files byte for byte, so both are produced from
//! fixed templates with a small set of named substitutions rather than built
//! through a generic plist serializer.

use crate::bundler::error::{Error, Result};
use handlebars::Handlebars;
use std::collections::BTreeMap;

/// Four-character package type code for applications.
pub const PACKAGE_TYPE: &str = "APPL";

/// Filler for signatures derived from names shorter than four characters.
pub const SIGNATURE_PAD: char = '?';

const INFO_PLIST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple Computer//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleDevelopmentRegion</key>
	<string>English</string>
	<key>CFBundleExecutable</key>
	<string>{{name}}</string>
	<key>CFBundleGetInfoString</key>
	<string>1.0</string>
	<key>CFBundleIconFile</key>
	<string>icon.icns</string>
	<key>CFBundleIdentifier</key>
	<string>{{name}}</string>
	<key>CFBundleInfoDictionaryVersion</key>
	<string>6.0</string>
	<key>CFBundleName</key>
	<string>{{name}}</string>
	<key>CFBundlePackageType</key>
	<string>APPL</string>
	<key>CFBundleShortVersionString</key>
	<string>1.0.0</string>
	<key>CFBundleSignature</key>
	<string>{{signature}}</string>
	<key>CFBundleVersion</key>
	<string>1</string>
</dict>
</plist>"#;

/// Four-character signature derived from `name`.
///
/// Takes the first four characters; shorter names are right-padded with
/// [`SIGNATURE_PAD`]. Empty names are rejected.
pub fn signature(name: &str, field: &'static str) -> Result<String> {
    if name.is_empty() {
        return Err(Error::EmptyName { field });
    }
    let mut sig: String = name.chars().take(4).collect();
    while sig.chars().count() < 4 {
        sig.push(SIGNATURE_PAD);
    }
    Ok(sig)
}

/// Renders `Info.plist` for a bundle named `project_name`.
pub fn render_info_plist(project_name: &str) -> Result<String> {
    let mut values = BTreeMap::new();
    values.insert("name", project_name.to_string());
    values.insert("signature", signature(project_name, "project name")?);

    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(escape_xml);
    handlebars.register_template_string("info_plist", INFO_PLIST_TEMPLATE)?;

    Ok(handlebars.render("info_plist", &values)?)
}

/// Renders `PkgInfo`: `APPL`, the binary signature, and a newline.
pub fn render_pkg_info(binary_name: &str) -> Result<String> {
    Ok(format!(
        "{}{}\n",
        PACKAGE_TYPE,
        signature(binary_name, "binary name")?
    ))
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN_INFO_PLIST: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<!DOCTYPE plist PUBLIC \"-//Apple Computer//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">
<plist version=\"1.0\">
<dict>
\t<key>CFBundleDevelopmentRegion</key>
\t<string>English</string>
\t<key>CFBundleExecutable</key>
\t<string>Starfield</string>
\t<key>CFBundleGetInfoString</key>
\t<string>1.0</string>
\t<key>CFBundleIconFile</key>
\t<string>icon.icns</string>
\t<key>CFBundleIdentifier</key>
\t<string>Starfield</string>
\t<key>CFBundleInfoDictionaryVersion</key>
\t<string>6.0</string>
\t<key>CFBundleName</key>
\t<string>Starfield</string>
\t<key>CFBundlePackageType</key>
\t<string>APPL</string>
\t<key>CFBundleShortVersionString</key>
\t<string>1.0.0</string>
\t<key>CFBundleSignature</key>
\t<string>Star</string>
\t<key>CFBundleVersion</key>
\t<string>1</string>
</dict>
</plist>";

    #[test]
    fn info_plist_matches_golden() {
        assert_eq!(render_info_plist("Starfield").unwrap(), GOLDEN_INFO_PLIST);
    }

    #[test]
    fn info_plist_has_no_trailing_newline() {
        let text = render_info_plist("Starfield").unwrap();
        assert!(text.ends_with("</dict>\n</plist>"));
    }

    #[test]
    fn info_plist_escapes_markup() {
        let text = render_info_plist("R&D <Lab>").unwrap();
        assert!(text.contains("<string>R&amp;D &lt;Lab&gt;</string>"));
        assert!(text.contains("<string>R&amp;D </string>"));
    }

    #[test]
    fn pkg_info_is_type_plus_signature() {
        assert_eq!(render_pkg_info("starfield").unwrap(), "APPLstar\n");
        assert_eq!(render_pkg_info("game").unwrap(), "APPLgame\n");
    }

    #[test]
    fn short_names_are_padded() {
        assert_eq!(signature("ab", "binary name").unwrap(), "ab??");
        assert_eq!(render_pkg_info("x").unwrap(), "APPLx???\n");
        assert!(render_info_plist("Go").unwrap().contains("<string>Go??</string>"));
    }

    #[test]
    fn signature_counts_characters_not_bytes() {
        assert_eq!(signature("Éclair", "project name").unwrap(), "Écla");
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(matches!(
            render_pkg_info(""),
            Err(Error::EmptyName { field: "binary name" })
        ));
        assert!(matches!(
            render_info_plist(""),
            Err(Error::EmptyName { field: "project name" })
        ));
    }
}
