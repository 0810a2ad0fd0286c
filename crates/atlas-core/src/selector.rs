//! Simple-selector parsing and matching for scene elements.
//!
//! Built on `winnow` 0.7. The grammar covers the compound selectors the
//! avoid list uses: an optional tag, `#id`, any number of `.class` terms,
//! and `[attr]` / `[attr="value"]` terms. No combinators — matching a
//! hierarchy is done by walking ancestors (`closest`).

use crate::id::Atom;
use crate::scene::{SceneElement, SceneQuery, SceneRef, self_and_ancestors};
use winnow::combinator::{alt, delimited, opt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::take_while;

/// A parsed compound selector, e.g. `button.primary[role="button"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<Atom>,
    id: Option<Atom>,
    classes: Vec<Atom>,
    /// Attribute presence (`[role]`) or exact-value (`[role="button"]`) terms.
    attrs: Vec<(Atom, Option<String>)>,
}

impl Selector {
    /// Parse a selector string. The whole input must be consumed.
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut rest = input.trim();
        if rest.is_empty() {
            return Err("empty selector".to_string());
        }
        let selector = parse_compound
            .parse_next(&mut rest)
            .map_err(|e| format!("selector parse error in {input:?}: {e}"))?;
        if !rest.is_empty() {
            return Err(format!("trailing input in selector {input:?}: {rest:?}"));
        }
        Ok(selector)
    }

    /// Whether a single element satisfies every term of this selector.
    pub fn matches(&self, element: &SceneElement) -> bool {
        if let Some(tag) = self.tag
            && element.tag != tag
        {
            return false;
        }
        if let Some(id) = self.id
            && element.id != Some(id)
        {
            return false;
        }
        if !self.classes.iter().all(|c| element.has_class(*c)) {
            return false;
        }
        self.attrs.iter().all(|(key, want)| match element.attr(*key) {
            Some(value) => want.as_deref().is_none_or(|w| w == value),
            None => false,
        })
    }
}

/// Nearest of `from` and its ancestors matching `selector`
/// (`Element.closest` semantics).
pub fn closest(scene: &dyn SceneQuery, from: SceneRef, selector: &Selector) -> Option<SceneRef> {
    self_and_ancestors(scene, from)
        .into_iter()
        .find(|&r| selector.matches(scene.element(r)))
}

// ─── winnow grammar ──────────────────────────────────────────────────────

enum Term {
    Id(Atom),
    Class(Atom),
    Attr(Atom, Option<String>),
}

fn parse_ident<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    })
    .parse_next(input)
}

fn parse_term(input: &mut &str) -> ModalResult<Term> {
    alt((
        preceded('#', parse_ident).map(|s| Term::Id(Atom::intern(s))),
        preceded('.', parse_ident).map(|s| Term::Class(Atom::intern(s))),
        delimited('[', parse_attr_body, ']'),
    ))
    .parse_next(input)
}

fn parse_attr_body(input: &mut &str) -> ModalResult<Term> {
    let key = parse_ident.parse_next(input)?;
    let value = opt(preceded(
        '=',
        delimited('"', take_while(0.., |c: char| c != '"'), '"'),
    ))
    .parse_next(input)?;
    Ok(Term::Attr(Atom::intern(key), value.map(str::to_string)))
}

fn parse_compound(input: &mut &str) -> ModalResult<Selector> {
    let tag = opt(parse_ident).parse_next(input)?;
    let terms: Vec<Term> = if tag.is_some() {
        repeat(0.., parse_term).parse_next(input)?
    } else {
        repeat(1.., parse_term).parse_next(input)?
    };

    let mut selector = Selector {
        tag: tag.map(Atom::intern_lower),
        id: None,
        classes: Vec::new(),
        attrs: Vec::new(),
    };
    for term in terms {
        match term {
            Term::Id(id) => selector.id = Some(id),
            Term::Class(c) => selector.classes.push(c),
            Term::Attr(k, v) => selector.attrs.push((k, v)),
        }
    }
    Ok(selector)
}

/// Parse a list of selector strings, skipping (and logging) invalid ones.
/// Invalid avoid-list entries degrade to "never matches", not errors.
pub fn parse_list(inputs: &[String]) -> Vec<Selector> {
    inputs
        .iter()
        .filter_map(|s| match Selector::parse(s) {
            Ok(sel) => Some(sel),
            Err(err) => {
                log::warn!("ignoring invalid selector: {err}");
                None
            }
        })
        .collect()
}
