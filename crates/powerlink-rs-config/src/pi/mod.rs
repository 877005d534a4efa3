// crates/powerlink-rs-config/src/pi/mod.rs

//! Process-image variables, their bit layout and the rendered headers.

mod c_header;
mod csharp;
mod layout;
mod naming;
mod var;

pub use c_header::render_c_header;
pub use csharp::{csharp_size, csharp_type, render_csharp};
pub use layout::{DirectionLayout, LayoutField};
pub use naming::make_unique_names;
pub use var::{IecDatatype, ProcessImageVar};

#[cfg(test)]
pub(crate) use var::tests::pi_var;

/// Target language of a process-image description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLanguage {
    #[default]
    C,
    CSharp,
    /// Rendered with the C generator.
    Xml,
}

impl OutputLanguage {
    /// Parses a case-insensitive language name (`c`, `csharp`/`c#`, `xml`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("c") {
            Some(Self::C)
        } else if ["csharp", "c#", "cs"].iter().any(|n| s.eq_ignore_ascii_case(n)) {
            Some(Self::CSharp)
        } else if s.eq_ignore_ascii_case("xml") {
            Some(Self::Xml)
        } else {
            None
        }
    }

    /// Extension of the generated file, without the dot.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::C | Self::Xml => "h",
            Self::CSharp => "cs",
        }
    }

    /// Renders both layouts; `None` when the language writes no file.
    pub fn render(
        &self,
        comment: &str,
        input: &DirectionLayout<'_>,
        output: &DirectionLayout<'_>,
    ) -> Option<alloc::string::String> {
        match self {
            Self::C | Self::Xml => Some(render_c_header(comment, input, output)),
            Self::CSharp => render_csharp(comment, input, output),
        }
    }
}

#[cfg(test)]
mod lang_tests {
    use super::*;

    #[test]
    fn test_output_language_parse() {
        assert_eq!(OutputLanguage::parse("C"), Some(OutputLanguage::C));
        assert_eq!(OutputLanguage::parse("c#"), Some(OutputLanguage::CSharp));
        assert_eq!(OutputLanguage::parse(" xml "), Some(OutputLanguage::Xml));
        assert_eq!(OutputLanguage::parse("rust"), None);
        assert_eq!(OutputLanguage::CSharp.file_extension(), "cs");
    }
}
