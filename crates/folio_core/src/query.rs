//! Element queries
//!
//! The behaviors only ever need a handful of selector shapes. [`Query`] names
//! them explicitly so a view binding can either translate them into a CSS
//! selector (see the `Display` impl) or match them directly.

use std::fmt;

/// A lookup of page elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Element with the given `id` (`#id`)
    Id(String),
    /// Elements carrying a class (`.class`)
    Class(String),
    /// Elements carrying any of the classes (`.a, .b`), in document order
    AnyClass(Vec<String>),
    /// Elements of a tag that have an attribute (`section[id]`)
    TagWithAttr { tag: String, attr: String },
    /// Elements of a tag whose attribute starts with a prefix (`a[href^="#"]`)
    AttrPrefix {
        tag: String,
        attr: String,
        prefix: String,
    },
}

impl Query {
    pub fn id(id: impl Into<String>) -> Self {
        Query::Id(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Query::Class(class.into())
    }

    /// Same-page anchor links (`a[href^="#"]`)
    pub fn anchor_links() -> Self {
        Query::AttrPrefix {
            tag: "a".to_string(),
            attr: "href".to_string(),
            prefix: "#".to_string(),
        }
    }

    /// Elements of `tag` carrying an `id` attribute
    pub fn identified(tag: impl Into<String>) -> Self {
        Query::TagWithAttr {
            tag: tag.into(),
            attr: "id".to_string(),
        }
    }

    /// Match against an element's parts
    ///
    /// `attr` looks up an attribute value by name. Used by bindings that
    /// cannot hand the query to a native selector engine.
    pub fn matches<'a>(
        &self,
        tag: &str,
        classes: impl IntoIterator<Item = &'a str>,
        attr: impl Fn(&str) -> Option<&'a str>,
    ) -> bool {
        match self {
            Query::Id(id) => attr("id") == Some(id.as_str()),
            Query::Class(class) => classes.into_iter().any(|c| c == class),
            Query::AnyClass(wanted) => classes
                .into_iter()
                .any(|c| wanted.iter().any(|w| w == c)),
            Query::TagWithAttr { tag: t, attr: a } => {
                t.eq_ignore_ascii_case(tag) && attr(a).is_some()
            }
            Query::AttrPrefix {
                tag: t,
                attr: a,
                prefix,
            } => {
                t.eq_ignore_ascii_case(tag)
                    && attr(a).is_some_and(|value| value.starts_with(prefix.as_str()))
            }
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Id(id) => write!(f, "#{id}"),
            Query::Class(class) => write!(f, ".{class}"),
            Query::AnyClass(classes) => {
                for (i, class) in classes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, ".{class}")?;
                }
                Ok(())
            }
            Query::TagWithAttr { tag, attr } => write!(f, "{tag}[{attr}]"),
            Query::AttrPrefix { tag, attr, prefix } => write!(f, "{tag}[{attr}^=\"{prefix}\"]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_selectors() {
        assert_eq!(Query::id("header").to_string(), "#header");
        assert_eq!(Query::class("nav__link").to_string(), ".nav__link");
        assert_eq!(
            Query::AnyClass(vec!["about-card".into(), "bento-card".into()]).to_string(),
            ".about-card, .bento-card"
        );
        assert_eq!(Query::identified("section").to_string(), "section[id]");
        assert_eq!(Query::anchor_links().to_string(), "a[href^=\"#\"]");
    }

    #[test]
    fn test_matching() {
        let attrs = [("href", "#about"), ("id", "link")];
        let lookup = |name: &str| attrs.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);

        assert!(Query::anchor_links().matches("a", ["nav__link"], lookup));
        assert!(Query::anchor_links().matches("A", [], lookup));
        assert!(!Query::anchor_links().matches("div", [], lookup));
        assert!(Query::id("link").matches("a", [], lookup));
        assert!(Query::class("nav__link").matches("a", ["x", "nav__link"], lookup));
        assert!(!Query::class("nav").matches("a", ["nav__link"], lookup));
        assert!(!Query::identified("section").matches("section", [], |_| None));
    }
}
