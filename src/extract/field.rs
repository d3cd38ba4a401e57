// src/extract/field.rs

use scraper::ElementRef;

/// How a locator recognises its element besides the tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Tag name alone.
    Any,
    /// Every whitespace-separated class in the string must be present, in any
    /// order and alongside any others; the attribute is not compared verbatim.
    Class(&'static str),
    Id(&'static str),
    /// For ids carrying a per-listing key in front, e.g. `12345_DeltaPrice`.
    IdSuffix(&'static str),
    IdPrefix(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    pub tag: &'static str,
    pub matcher: Matcher,
}

impl Locator {
    pub const fn tag(tag: &'static str) -> Self {
        Self {
            tag,
            matcher: Matcher::Any,
        }
    }

    pub const fn class(tag: &'static str, classes: &'static str) -> Self {
        Self {
            tag,
            matcher: Matcher::Class(classes),
        }
    }

    pub const fn id(tag: &'static str, id: &'static str) -> Self {
        Self {
            tag,
            matcher: Matcher::Id(id),
        }
    }

    pub const fn id_suffix(tag: &'static str, suffix: &'static str) -> Self {
        Self {
            tag,
            matcher: Matcher::IdSuffix(suffix),
        }
    }

    pub const fn id_prefix(tag: &'static str, prefix: &'static str) -> Self {
        Self {
            tag,
            matcher: Matcher::IdPrefix(prefix),
        }
    }

    pub fn matches(&self, el: &ElementRef<'_>) -> bool {
        let value = el.value();
        if !value.name().eq_ignore_ascii_case(self.tag) {
            return false;
        }
        match self.matcher {
            Matcher::Any => true,
            Matcher::Class(classes) => classes
                .split_whitespace()
                .all(|c| value.classes().any(|have| have == c)),
            Matcher::Id(id) => value.id() == Some(id),
            Matcher::IdSuffix(suffix) => value.id().is_some_and(|id| id.ends_with(suffix)),
            Matcher::IdPrefix(prefix) => value.id().is_some_and(|id| id.starts_with(prefix)),
        }
    }
}

/// First descendant of `scope` (not `scope` itself) matching `locator`, in
/// document order.
pub fn find<'a>(scope: ElementRef<'a>, locator: &Locator) -> Option<ElementRef<'a>> {
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| locator.matches(el))
}

/// All matching descendants, in document order.
pub fn find_all<'a>(
    scope: ElementRef<'a>,
    locator: &'a Locator,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |el| locator.matches(el))
}

pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the matching element, `None` if there is none.
pub fn extract_text(scope: ElementRef<'_>, locator: &Locator) -> Option<String> {
    find(scope, locator).map(element_text)
}

/// Attribute value of the matching element, `None` if the element or the
/// attribute is missing.
pub fn extract_attr(scope: ElementRef<'_>, locator: &Locator, attr: &str) -> Option<String> {
    find(scope, locator)
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}
