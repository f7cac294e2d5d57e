//! Starter file templates.
//!
//! Rendered with `handlebars` in strict mode and without HTML escaping, so
//! the output is exactly the template text plus the substituted values.

use crate::bundler::Result;
use chrono::NaiveDate;
use handlebars::{Handlebars, no_escape};
use std::collections::BTreeMap;

/// Date format used in the journal heading, e.g. `Tue Mar 05, 2024`.
pub const JOURNAL_DATE_FORMAT: &str = "%a %b %d, %Y";

pub(crate) const MAIN_CPP: &str = r#"
/** \file main.cpp
 */
#include <stdio.h>

int main(int argc, const char** argv) {
    printf("Hello World!\n");
    return 0;
}
"#;

pub(crate) const MAINPAGE_DOX: &str = r#"
/** \file mainpage.dox
\mainpage

This is the main page of documentation for {{name}}.  Edit
<code>mainpage.dox</code> to change it.  Documentation for
your classes and methods will automatically be generated by
Doxygen and added to these pages.

This file and the comments in your code may use any commands from the
<a href="http://www.stack.nl/~dimitri/doxygen/commands.html">Doxygen manual</a>
and the custom commands:
\verbatim
\cite source
\maintainer name
\created date
\edited date
\units units
\thumbnail{imagefilename}
\thumbnail{imagefilename,caption}
\endverbatim

See your \link Journal Development Journal \endlink.
*/
"#;

pub(crate) const JOURNAL_DOX: &str = r#"
/** \file journal/journal.dox
\page Journal Development Journal

<i>Newest entries are at the top</i>

<hr><h2>{{date}}: Project started</h2>
This file was created today.

You can embed images in this file using the Doxygen commands:
\verbatim
\thumbnail{imagefilename}
\thumbnail{imagefilename, caption}
\image html imagefilename
\endverbatim

The <code>imagefilename</code> does not need to include a path.  Put the images
in the <code>journal/</code> or <code>doc-files/</code> directories.  They will
automatically be copied to the <code>build/doc</code> directory when you run Doxygen.
*/
"#;

pub(crate) const LIBRARY_HEADER: &str = r#"
/** @file {{name}}.h
 */

#ifndef {{guard}}
#define {{guard}}

#endif
"#;

/// Renderer holding every starter template.
pub(crate) struct StarterTemplates {
    registry: Handlebars<'static>,
}

impl StarterTemplates {
    pub(crate) fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry.register_template_string("mainpage", MAINPAGE_DOX)?;
        registry.register_template_string("journal", JOURNAL_DOX)?;
        registry.register_template_string("header", LIBRARY_HEADER)?;
        Ok(Self { registry })
    }

    pub(crate) fn mainpage(&self, project_name: &str) -> Result<String> {
        let mut values = BTreeMap::new();
        values.insert("name", project_name.to_string());
        Ok(self.registry.render("mainpage", &values)?)
    }

    pub(crate) fn journal(&self, today: NaiveDate) -> Result<String> {
        let mut values = BTreeMap::new();
        values.insert("date", today.format(JOURNAL_DATE_FORMAT).to_string());
        Ok(self.registry.render("journal", &values)?)
    }

    pub(crate) fn library_header(&self, project_name: &str) -> Result<String> {
        let mut values = BTreeMap::new();
        values.insert("name", project_name.to_string());
        values.insert("guard", include_guard(project_name));
        Ok(self.registry.render("header", &values)?)
    }
}

/// `<NAME>_H`, with characters that cannot appear in a macro name replaced by `_`.
pub fn include_guard(project_name: &str) -> String {
    let mut guard: String = project_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    guard.push_str("_H");
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journal_heading_uses_weekday_format() {
        let templates = StarterTemplates::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let journal = templates.journal(date).unwrap();

        assert!(journal.contains("<hr><h2>Tue Mar 05, 2024: Project started</h2>"));
        assert!(journal.starts_with("\n/** \\file journal/journal.dox\n"));
    }

    #[test]
    fn templates_are_not_html_escaped() {
        let templates = StarterTemplates::new().unwrap();
        let page = templates.mainpage("R&D").unwrap();

        assert!(page.contains("documentation for R&D."));
        assert!(page.contains("<code>mainpage.dox</code>"));
    }

    #[test]
    fn header_guard_appears_twice() {
        let templates = StarterTemplates::new().unwrap();
        let header = templates.library_header("Widgets").unwrap();

        assert_eq!(header.matches("WIDGETS_H").count(), 2);
        assert!(header.contains("#ifndef WIDGETS_H\n#define WIDGETS_H\n"));
        assert!(header.contains("@file Widgets.h"));
    }

    #[test]
    fn guard_replaces_invalid_characters() {
        assert_eq!(include_guard("my-lib 2"), "MY_LIB_2_H");
        assert_eq!(include_guard("G3D"), "G3D_H");
    }

    #[test]
    fn guard_maps_each_non_ascii_character_to_one_underscore() {
        assert_eq!(include_guard("Éclair"), "_CLAIR_H");
        assert_eq!(include_guard("Größe"), "GR__E_H");
    }
}
